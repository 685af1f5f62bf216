//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Fixed step only, no wall-clock time
//! - Random draws only through an owned `RandomSource`
//! - Bodies updated in order, each independently of the others
//! - No rendering or platform dependencies

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Contact, FloorResponse, classify};
pub use rng::{RandomSource, ScriptedSource, SeededSource};
pub use state::{Body, Bounds, Color, SceneParams, Simulator, World, random_color, random_velocity};
pub use tick::{BodyStep, StepSummary, step_body};
