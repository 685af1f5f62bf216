//! Render boundary
//!
//! Read-only views of simulation state, shaped for whatever draws them.

pub mod shapes;
pub mod vertex;

pub use shapes::{FillRect, Frame, body_quad, frame_vertices};
pub use vertex::Vertex;
