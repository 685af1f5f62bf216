//! Crate error type
//!
//! Stepping never fails; everything here comes from building a scene or
//! loading its settings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("screen bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },

    #[error("body size must be positive and finite, got {x}x{y}")]
    InvalidBodySize { x: f64, y: f64 },

    #[error("velocity range is empty: [{low}, {high}]")]
    EmptyVelocityRange { low: i32, high: i32 },

    #[error("body {index} has a non-finite position or velocity")]
    NonFiniteBody { index: usize },

    #[error("world parameter `{name}` must be finite, got {value}")]
    NonFiniteWorld { name: &'static str, value: f64 },

    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
