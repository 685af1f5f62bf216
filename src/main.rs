//! Gravity Squares entry point
//!
//! Headless host: builds a scene from settings, then runs the frame loop
//! (draw, update, pause) without opening a window. Frames can be streamed as
//! JSON lines for an external renderer.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Parser;

use gravity_squares::Settings;
use gravity_squares::host::{OutputMode, Overrides, RunOptions, run_frames};
use gravity_squares::sim::{SeededSource, Simulator};

#[derive(Parser)]
#[command(name = "gravity-squares")]
#[command(about = "Bouncing squares under gravity, run headless", long_about = None)]
struct Cli {
    /// JSON settings file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of squares
    #[arg(long)]
    bodies: Option<usize>,

    /// Override the pause between frames in milliseconds (0 = unpaced)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Respawn the scene every N frames
    #[arg(long)]
    reset_every: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputMode::Summary)]
    output: OutputMode,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let overrides = Overrides {
        seed: cli.seed,
        bodies: cli.bodies,
        delay_ms: cli.delay_ms,
    };
    let settings = overrides.apply(loaded)?;

    if cli.dump_config {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    log::info!("Gravity Squares (headless) starting, seed {}", settings.seed);
    let mut sim = Simulator::new(&settings, SeededSource::new(settings.seed))?;
    let options = RunOptions {
        reset_every: cli.reset_every,
        output: cli.output,
        ..RunOptions::from_settings(&settings, cli.frames)
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let report = run_frames(&mut sim, &options, &mut out)?;
    drop(out);

    if cli.output == OutputMode::Summary {
        println!("{}", report);
        for (i, body) in sim.bodies().iter().enumerate() {
            println!(
                "body {}: pos=({:.2}, {:.2}) vel=({:.2}, {:.2})",
                i, body.position.x, body.position.y, body.velocity.x, body.velocity.y
            );
        }
    } else {
        log::info!("{}", report);
    }
    Ok(())
}
