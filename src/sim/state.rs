//! Simulation state and core types
//!
//! Everything the step function reads or writes lives here: the bodies, the
//! world constants, the scene bounds and the random source.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::settings::{Settings, VelocityRange};

/// RGBA color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for Color {
    /// Opaque white
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::new(0, 0, 0, 0xff);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from RGB channels
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 0xff)
    }

    /// Channels normalized to 0.0-1.0 for GPU consumers
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            self.alpha as f32 / 255.0,
        ]
    }
}

/// One simulated square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Width and height, fixed for the body's lifetime
    pub size: DVec2,
    /// Top-left corner in screen coordinates (y grows downward)
    pub position: DVec2,
    /// Displacement per step
    pub velocity: DVec2,
    pub color: Color,
}

impl Body {
    pub fn new(size: DVec2, position: DVec2, velocity: DVec2) -> Self {
        Self {
            size,
            position,
            velocity,
            color: Color::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// Physical constants shared by every body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    /// Added to vertical velocity every step
    pub gravity: f64,
    /// Fraction of speed kept when bouncing
    pub damping: f64,
    /// Horizontal velocity multiplier applied every step
    pub air_resistance: f64,
}

impl Default for World {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            damping: DAMPING,
            air_resistance: AIR_RESISTANCE,
        }
    }
}

impl World {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("air_resistance", self.air_resistance),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::NonFiniteWorld { name, value });
            }
        }
        Ok(())
    }
}

/// Screen rectangle `[0, width] x [0, height]` that confines the bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    /// Spawn point for new bodies (integer center of the screen)
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }
}

/// Check that a body size is usable
pub fn validate_body_size(size: DVec2) -> Result<()> {
    let ok = |v: f64| v.is_finite() && v > 0.0;
    if ok(size.x) && ok(size.y) {
        Ok(())
    } else {
        Err(Error::InvalidBodySize {
            x: size.x,
            y: size.y,
        })
    }
}

/// Random opaque color, channels drawn red, green, blue
pub fn random_color(rng: &mut dyn RandomSource) -> Color {
    let mut channel = || rng.uniform_int(0, 255).clamp(0, 255) as u8;
    let red = channel();
    let green = channel();
    let blue = channel();
    Color::from_rgb(red, green, blue)
}

/// Random velocity, x drawn before y
pub fn random_velocity(rng: &mut dyn RandomSource, range: VelocityRange) -> DVec2 {
    let x = rng.uniform_int(range.low, range.high) as f64;
    let y = rng.uniform_int(range.low, range.high) as f64;
    DVec2::new(x, y)
}

/// Parameters needed to (re)populate a scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    pub body_count: usize,
    pub body_size: DVec2,
    pub velocity_range: VelocityRange,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            body_count: BODY_COUNT,
            body_size: DVec2::splat(BODY_SIZE),
            velocity_range: VelocityRange::default(),
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<()> {
        validate_body_size(self.body_size)?;
        if self.velocity_range.low > self.velocity_range.high {
            return Err(Error::EmptyVelocityRange {
                low: self.velocity_range.low,
                high: self.velocity_range.high,
            });
        }
        Ok(())
    }
}

/// Create `params.body_count` bodies at the center of `bounds`
pub fn spawn_bodies(params: &SceneParams, bounds: Bounds, rng: &mut dyn RandomSource) -> Vec<Body> {
    (0..params.body_count)
        .map(|_| {
            let velocity = random_velocity(rng, params.velocity_range);
            let color = random_color(rng);
            Body::new(params.body_size, bounds.center(), velocity).with_color(color)
        })
        .collect()
}

/// Owns the world, the bodies and the random source for one run
#[derive(Debug, Clone)]
pub struct Simulator<R: RandomSource> {
    pub(crate) world: World,
    pub(crate) bounds: Bounds,
    pub(crate) scene: SceneParams,
    pub(crate) bodies: Vec<Body>,
    pub(crate) rng: R,
    pub(crate) steps: u64,
}

impl<R: RandomSource> Simulator<R> {
    /// Build a scene from validated settings
    pub fn new(settings: &Settings, mut rng: R) -> Result<Self> {
        settings.validate()?;
        let bounds = settings.bounds()?;
        let scene = SceneParams {
            body_count: settings.body_count,
            body_size: settings.body_size,
            velocity_range: settings.velocity_range,
        };
        let bodies = spawn_bodies(&scene, bounds, &mut rng);
        log::info!(
            "Scene ready: {} bodies in {}x{}",
            bodies.len(),
            bounds.width,
            bounds.height
        );

        Ok(Self {
            world: settings.world,
            bounds,
            scene,
            bodies,
            rng,
            steps: 0,
        })
    }

    /// Build a scene around caller-provided bodies
    ///
    /// Unless [`with_scene`](Self::with_scene) says otherwise, a later
    /// [`reset`](Self::reset) spawns the same number of bodies, sized like the
    /// first one, with the default velocity range.
    pub fn with_bodies(world: World, bounds: Bounds, bodies: Vec<Body>, rng: R) -> Result<Self> {
        world.validate()?;
        let bounds = Bounds::new(bounds.width, bounds.height)?;
        for (index, body) in bodies.iter().enumerate() {
            validate_body_size(body.size)?;
            if !body.position.is_finite() || !body.velocity.is_finite() {
                return Err(Error::NonFiniteBody { index });
            }
        }
        let scene = SceneParams {
            body_count: bodies.len(),
            body_size: bodies
                .first()
                .map(|b| b.size)
                .unwrap_or(DVec2::splat(BODY_SIZE)),
            velocity_range: VelocityRange::default(),
        };

        Ok(Self {
            world,
            bounds,
            scene,
            bodies,
            rng,
            steps: 0,
        })
    }

    /// Replace the parameters used by [`reset`](Self::reset)
    pub fn with_scene(mut self, scene: SceneParams) -> Result<Self> {
        scene.validate()?;
        self.scene = scene;
        Ok(self)
    }

    /// Throw away the current bodies and spawn a fresh set
    pub fn reset(&mut self) {
        self.bodies = spawn_bodies(&self.scene, self.bounds, &mut self.rng);
        self.steps = 0;
        log::info!("Scene reset: {} bodies respawned", self.bodies.len());
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn scene(&self) -> &SceneParams {
        &self.scene
    }

    /// Steps taken since construction or the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedSource, SeededSource};

    #[test]
    fn test_color_defaults_to_opaque_white() {
        let c = Color::default();
        assert_eq!(c, Color::new(255, 255, 255, 255));
        assert_eq!(Color::from_rgb(1, 2, 3).alpha, 255);
    }

    #[test]
    fn test_vector_addition() {
        let v = DVec2::new(1.0, 2.0) + DVec2::new(3.0, 4.0);
        assert_eq!(v, DVec2::new(4.0, 6.0));
    }

    #[test]
    fn test_bounds_reject_zero() {
        assert!(matches!(
            Bounds::new(0, 600),
            Err(Error::InvalidBounds { width: 0, height: 600 })
        ));
        assert!(Bounds::new(800, 0).is_err());
        assert_eq!(Bounds::new(801, 601).unwrap().center(), DVec2::new(400.0, 300.0));
    }

    #[test]
    fn test_body_size_validation() {
        assert!(validate_body_size(DVec2::new(10.0, 10.0)).is_ok());
        assert!(validate_body_size(DVec2::new(0.0, 10.0)).is_err());
        assert!(validate_body_size(DVec2::new(10.0, -1.0)).is_err());
        assert!(validate_body_size(DVec2::new(f64::NAN, 10.0)).is_err());
    }

    #[test]
    fn test_world_rejects_non_finite() {
        let world = World {
            gravity: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            world.validate(),
            Err(Error::NonFiniteWorld { name: "gravity", .. })
        ));
        assert!(World::default().validate().is_ok());
    }

    #[test]
    fn test_spawn_draw_order() {
        // velocity x, velocity y, red, green, blue
        let mut rng = ScriptedSource::new(vec![3, -4, 10, 20, 30]);
        let params = SceneParams {
            body_count: 2,
            ..Default::default()
        };
        let bodies = spawn_bodies(&params, Bounds::default(), &mut rng);

        assert_eq!(bodies.len(), 2);
        for body in &bodies {
            assert_eq!(body.velocity, DVec2::new(3.0, -4.0));
            assert_eq!(body.color, Color::new(10, 20, 30, 255));
            assert_eq!(body.position, DVec2::new(400.0, 300.0));
            assert_eq!(body.size, DVec2::splat(BODY_SIZE));
        }
        assert_eq!(rng.draws(), 10);
    }

    #[test]
    fn test_simulator_new_validates_settings() {
        let settings = Settings {
            screen_width: 0,
            ..Default::default()
        };
        assert!(Simulator::new(&settings, SeededSource::new(1)).is_err());

        let sim = Simulator::new(&Settings::default(), SeededSource::new(1)).unwrap();
        assert_eq!(sim.bodies().len(), BODY_COUNT);
        assert_eq!(sim.steps(), 0);
    }

    #[test]
    fn test_with_bodies_rejects_bad_size() {
        let body = Body::new(DVec2::new(-1.0, 10.0), DVec2::ZERO, DVec2::ZERO);
        let result = Simulator::with_bodies(
            World::default(),
            Bounds::default(),
            vec![body],
            ScriptedSource::constant(0),
        );
        assert!(matches!(result, Err(Error::InvalidBodySize { .. })));
    }

    #[test]
    fn test_with_bodies_rejects_non_finite_state() {
        let good = Body::new(DVec2::splat(10.0), DVec2::new(5.0, 5.0), DVec2::ZERO);
        let nan_pos = Body::new(DVec2::splat(10.0), DVec2::new(f64::NAN, 5.0), DVec2::ZERO);
        let result = Simulator::with_bodies(
            World::default(),
            Bounds::default(),
            vec![good, nan_pos],
            ScriptedSource::constant(0),
        );
        assert!(matches!(result, Err(Error::NonFiniteBody { index: 1 })));

        let inf_vel = Body::new(DVec2::splat(10.0), DVec2::ZERO, DVec2::new(0.0, f64::INFINITY));
        let result = Simulator::with_bodies(
            World::default(),
            Bounds::default(),
            vec![inf_vel],
            ScriptedSource::constant(0),
        );
        assert!(matches!(result, Err(Error::NonFiniteBody { index: 0 })));
    }

    #[test]
    fn test_with_scene_controls_reset() {
        let body = Body::new(DVec2::splat(10.0), DVec2::new(5.0, 5.0), DVec2::ZERO);
        let scene = SceneParams {
            body_count: 3,
            body_size: DVec2::new(40.0, 20.0),
            velocity_range: VelocityRange { low: 7, high: 7 },
        };
        let mut sim = Simulator::with_bodies(
            World::default(),
            Bounds::default(),
            vec![body],
            SeededSource::new(11),
        )
        .unwrap()
        .with_scene(scene)
        .unwrap();

        sim.reset();
        assert_eq!(sim.bodies().len(), 3);
        for body in sim.bodies() {
            assert_eq!(body.size, DVec2::new(40.0, 20.0));
            assert_eq!(body.velocity, DVec2::new(7.0, 7.0));
        }
    }

    #[test]
    fn test_with_scene_rejects_empty_range() {
        let sim = Simulator::with_bodies(
            World::default(),
            Bounds::default(),
            Vec::new(),
            ScriptedSource::constant(0),
        )
        .unwrap();
        let scene = SceneParams {
            velocity_range: VelocityRange { low: 1, high: 0 },
            ..Default::default()
        };
        assert!(matches!(
            sim.with_scene(scene),
            Err(Error::EmptyVelocityRange { low: 1, high: 0 })
        ));
    }

    #[test]
    fn test_reset_respawns_at_center() {
        let mut sim = Simulator::new(&Settings::default(), SeededSource::new(5)).unwrap();
        sim.step_n(50);
        assert_eq!(sim.steps(), 50);

        sim.reset();
        assert_eq!(sim.steps(), 0);
        assert_eq!(sim.bodies().len(), BODY_COUNT);
        for body in sim.bodies() {
            assert_eq!(body.position, Bounds::default().center());
        }
    }
}
