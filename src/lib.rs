//! Gravity Squares - colored squares falling and bouncing inside a window
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, world, boundary handling)
//! - `renderer`: Render boundary (fill rects, frame snapshots, vertex quads)
//! - `settings`: Scene configuration loaded from JSON
//! - `host`: Headless frame loop driven by the binary
//! - `error`: Crate error type

pub mod error;
pub mod host;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{Settings, VelocityRange};

/// Simulation configuration constants
pub mod consts {
    /// Default scene bounds (pixels)
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Number of squares spawned per scene
    pub const BODY_COUNT: usize = 4;
    /// Edge length of a square (pixels)
    pub const BODY_SIZE: f64 = 100.0;

    /// Initial velocity components are drawn from this inclusive range
    pub const VELOCITY_LOW: i32 = -20;
    pub const VELOCITY_HIGH: i32 = 20;

    /// World defaults
    pub const GRAVITY: f64 = 0.5;
    pub const DAMPING: f64 = 0.9;
    pub const AIR_RESISTANCE: f64 = 0.995;

    /// Floor contacts slower than this settle instead of bouncing
    pub const SETTLE_THRESHOLD: f64 = 0.5;
    /// Horizontal friction applied while resting on the floor
    pub const REST_FRICTION: f64 = 0.95;

    /// Host-side pause between frames (milliseconds)
    pub const FRAME_DELAY_MS: u64 = 15;
}
