//! Boundary contact detection and response
//!
//! Bodies are axis-aligned squares inside a fixed screen rectangle. After
//! integration each body is classified against the four edges, then each
//! touched edge is resolved on its own: walls first, then floor, then ceiling.

use glam::DVec2;

use super::rng::RandomSource;
use super::state::{Body, Bounds, World, random_color};
use crate::consts::{REST_FRICTION, SETTLE_THRESHOLD};

/// Which edges a body touches after integration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    pub left_wall: bool,
    pub right_wall: bool,
    pub floor: bool,
    pub ceiling: bool,
}

impl Contact {
    pub fn on_wall(&self) -> bool {
        self.left_wall || self.right_wall
    }

    pub fn any(&self) -> bool {
        self.on_wall() || self.floor || self.ceiling
    }
}

/// What happened at the floor this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorResponse {
    /// Fast enough to rebound
    Bounce,
    /// Too slow to rebound; vertical motion stopped
    Settle,
}

/// Classify a body's position against the screen edges
pub fn classify(position: DVec2, size: DVec2, bounds: Bounds) -> Contact {
    let limit = bounds.size() - size;
    Contact {
        left_wall: position.x <= 0.0,
        right_wall: position.x >= limit.x,
        floor: position.y >= limit.y,
        ceiling: position.y <= 0.0,
    }
}

/// Clamp into the screen horizontally and reflect x velocity
///
/// When a body is wider than the screen both walls trigger and the right
/// clamp is applied last.
pub fn resolve_wall(
    body: &mut Body,
    contact: Contact,
    bounds: Bounds,
    world: &World,
    rng: &mut dyn RandomSource,
) {
    if contact.left_wall {
        body.position.x = 0.0;
    }
    if contact.right_wall {
        body.position.x = bounds.width as f64 - body.size.x;
    }
    body.velocity.x *= -world.damping;
    body.color = random_color(rng);
}

/// Rest the body on the floor, bouncing only above the settle threshold
pub fn resolve_floor(
    body: &mut Body,
    bounds: Bounds,
    world: &World,
    rng: &mut dyn RandomSource,
) -> FloorResponse {
    body.position.y = bounds.height as f64 - body.size.y;
    if body.velocity.y > SETTLE_THRESHOLD {
        body.velocity.y *= -world.damping;
        body.color = random_color(rng);
        FloorResponse::Bounce
    } else {
        body.velocity = DVec2::new(body.velocity.x * REST_FRICTION, 0.0);
        FloorResponse::Settle
    }
}

/// Clamp to the top edge and reflect y velocity
pub fn resolve_ceiling(body: &mut Body, world: &World, rng: &mut dyn RandomSource) {
    body.position.y = 0.0;
    body.velocity.y *= -world.damping;
    body.color = random_color(rng);
}
