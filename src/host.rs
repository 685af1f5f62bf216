//! Headless host loop
//!
//! Stands in for a windowed frame loop: each frame optionally respawns the
//! scene, draws (captures a snapshot), updates (one step), then pauses.

use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::ValueEnum;

use crate::error::Result;
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{Color, RandomSource, Simulator, StepSummary};

/// What the host writes while running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Report contact totals when the run ends
    #[default]
    Summary,
    /// One JSON frame snapshot per line
    Json,
}

/// Command-line overrides layered on top of loaded settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub bodies: Option<usize>,
    pub delay_ms: Option<u64>,
}

impl Overrides {
    /// Apply the overrides and validate the result
    pub fn apply(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(bodies) = self.bodies {
            settings.body_count = bodies;
        }
        if let Some(delay) = self.delay_ms {
            settings.frame_delay_ms = delay;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub frames: u64,
    /// Respawn every N frames; `None` or 0 never respawns
    pub reset_every: Option<u64>,
    pub output: OutputMode,
    pub delay: Duration,
    pub background: Color,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings, frames: u64) -> Self {
        Self {
            frames,
            reset_every: None,
            output: OutputMode::default(),
            delay: Duration::from_millis(settings.frame_delay_ms),
            background: settings.background,
        }
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub frames: u64,
    pub resets: u64,
    pub totals: StepSummary,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ran {} frames ({} resets): {} wall, {} floor bounce, {} settle, {} ceiling contacts",
            self.frames,
            self.resets,
            self.totals.wall_hits,
            self.totals.floor_bounces,
            self.totals.settled,
            self.totals.ceiling_hits
        )
    }
}

fn reset_due(frame: u64, every: Option<u64>) -> bool {
    match every {
        Some(every) if every > 0 => frame > 0 && frame % every == 0,
        _ => false,
    }
}

/// Run the frame loop, streaming JSON frames to `out` when requested
pub fn run_frames<R: RandomSource, W: Write>(
    sim: &mut Simulator<R>,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunReport> {
    let mut report = RunReport {
        frames: options.frames,
        ..Default::default()
    };

    for frame in 0..options.frames {
        if reset_due(frame, options.reset_every) {
            sim.reset();
            report.resets += 1;
        }

        // Draw
        if options.output == OutputMode::Json {
            let snapshot = Frame::capture(sim.steps(), options.background, sim.bodies());
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        }

        // Update
        report.totals += sim.step();

        if !options.delay.is_zero() {
            thread::sleep(options.delay);
        }
    }
    out.flush()?;

    Ok(report)
}
