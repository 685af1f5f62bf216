//! Fixed timestep simulation step
//!
//! One call advances every body by exactly one frame. There is no notion of
//! wall-clock time here; pacing belongs to the host.

use std::ops::AddAssign;

use super::collision::{
    Contact, FloorResponse, classify, resolve_ceiling, resolve_floor, resolve_wall,
};
use super::rng::RandomSource;
use super::state::{Body, Bounds, Simulator, World};

/// Outcome of stepping a single body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyStep {
    /// Edges touched after integration
    pub contact: Contact,
    /// Floor outcome, if the floor was touched
    pub floor: Option<FloorResponse>,
}

/// Advance one body by one step
///
/// Gravity and air resistance are applied first, then the position is
/// integrated with the updated velocity. Boundary contacts are classified on
/// the new position and each touched edge is resolved independently.
pub fn step_body(
    body: &mut Body,
    world: &World,
    bounds: Bounds,
    rng: &mut dyn RandomSource,
) -> BodyStep {
    body.velocity.y += world.gravity;
    body.velocity.x *= world.air_resistance;
    body.position += body.velocity;

    let contact = classify(body.position, body.size, bounds);

    if contact.on_wall() {
        resolve_wall(body, contact, bounds, world, rng);
    }

    let floor = if contact.floor {
        Some(resolve_floor(body, bounds, world, rng))
    } else {
        None
    };

    if contact.ceiling {
        resolve_ceiling(body, world, rng);
    }

    BodyStep { contact, floor }
}

/// Contact totals for one simulator step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub wall_hits: u32,
    pub floor_bounces: u32,
    pub settled: u32,
    pub ceiling_hits: u32,
}

impl StepSummary {
    fn record(&mut self, step: &BodyStep) {
        if step.contact.on_wall() {
            self.wall_hits += 1;
        }
        match step.floor {
            Some(FloorResponse::Bounce) => self.floor_bounces += 1,
            Some(FloorResponse::Settle) => self.settled += 1,
            None => {}
        }
        if step.contact.ceiling {
            self.ceiling_hits += 1;
        }
    }
}

impl AddAssign for StepSummary {
    fn add_assign(&mut self, other: Self) {
        self.wall_hits += other.wall_hits;
        self.floor_bounces += other.floor_bounces;
        self.settled += other.settled;
        self.ceiling_hits += other.ceiling_hits;
    }
}

impl<R: RandomSource> Simulator<R> {
    /// Advance every body by one step
    pub fn step(&mut self) -> StepSummary {
        let mut summary = StepSummary::default();
        for body in &mut self.bodies {
            let outcome = step_body(body, &self.world, self.bounds, &mut self.rng);
            summary.record(&outcome);
        }
        self.steps += 1;
        log::trace!("step {}: {:?}", self.steps, summary);
        summary
    }

    /// Advance `count` steps
    pub fn step_n(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }
}
