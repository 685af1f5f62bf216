//! Scene settings
//!
//! Everything the host hands to the simulator at construction time. Stored
//! as JSON; missing fields fall back to defaults.

use std::fs;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::state::{Bounds, Color, SceneParams, World};

/// Inclusive range for initial velocity components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VelocityRange {
    pub low: i32,
    pub high: i32,
}

impl Default for VelocityRange {
    fn default() -> Self {
        Self {
            low: VELOCITY_LOW,
            high: VELOCITY_HIGH,
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    pub body_count: usize,
    /// Width and height of every spawned square
    pub body_size: DVec2,
    pub velocity_range: VelocityRange,
    pub world: World,
    /// Seed for the default random source
    pub seed: u64,
    /// Host pause between frames; 0 runs unpaced
    pub frame_delay_ms: u64,
    /// Clear color drawn behind the squares
    pub background: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            body_count: BODY_COUNT,
            body_size: DVec2::splat(BODY_SIZE),
            velocity_range: VelocityRange::default(),
            world: World::default(),
            seed: 0,
            frame_delay_ms: FRAME_DELAY_MS,
            background: Color::default(),
        }
    }
}

impl Settings {
    /// Reject settings that would produce a degenerate scene
    pub fn validate(&self) -> Result<()> {
        Bounds::new(self.screen_width, self.screen_height)?;
        SceneParams {
            body_count: self.body_count,
            body_size: self.body_size,
            velocity_range: self.velocity_range,
        }
        .validate()?;
        self.world.validate()
    }

    pub fn bounds(&self) -> Result<Bounds> {
        Bounds::new(self.screen_width, self.screen_height)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_final_draft() {
        let s = Settings::default();
        assert_eq!((s.screen_width, s.screen_height), (800, 600));
        assert_eq!(s.body_count, 4);
        assert_eq!(s.body_size, DVec2::new(100.0, 100.0));
        assert_eq!(s.velocity_range, VelocityRange { low: -20, high: 20 });
        assert_eq!(s.world, World::default());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "body_count": 12, "world": { "gravity": 1.0 } }"#;
        let s = Settings::from_json(json).unwrap();
        assert_eq!(s.body_count, 12);
        assert_eq!(s.world.gravity, 1.0);
        assert_eq!(s.world.damping, DAMPING);
        assert_eq!(s.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_height = Settings {
            screen_height: 0,
            ..Default::default()
        };
        assert!(matches!(zero_height.validate(), Err(Error::InvalidBounds { .. })));

        let negative_size = Settings {
            body_size: DVec2::new(-10.0, 10.0),
            ..Default::default()
        };
        assert!(matches!(negative_size.validate(), Err(Error::InvalidBodySize { .. })));

        let empty_range = Settings {
            velocity_range: VelocityRange { low: 5, high: -5 },
            ..Default::default()
        };
        assert!(matches!(
            empty_range.validate(),
            Err(Error::EmptyVelocityRange { low: 5, high: -5 })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Settings::from_json("{ nope"), Err(Error::Json(_))));
    }
}
