//! Volley Brawl headless runner
//!
//! Window, input polling and audio live outside this crate. The runner drives
//! a match with idle inputs at the fixed timestep, which is handy for checking
//! a tuning file and for watching the marker logic in the logs
//! (`RUST_LOG=debug`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use volley_brawl::Tuning;
use volley_brawl::consts::SIM_DT;
use volley_brawl::sim::{MatchInput, MatchState, tick};

#[derive(Debug, Parser)]
#[command(name = "volley-brawl", about = "Run a Volley Brawl match headless")]
struct Args {
    /// RNG seed for waypoint draws (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON tuning file; missing fields use the defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut state = MatchState::new(tuning, seed).context("invalid tuning")?;
    log::info!("Volley Brawl (headless) starting, seed {seed}");

    let input = MatchInput::default();
    while !state.is_decided() && state.time_ticks < args.max_ticks {
        tick(&mut state, &input, SIM_DT);
    }

    match state.winner() {
        Some(winner) => println!(
            "{winner} WIN after {} ticks ({:.1}s)",
            state.time_ticks,
            state.time_ticks as f32 * SIM_DT
        ),
        None => println!("No winner after {} ticks", state.time_ticks),
    }

    if args.snapshot {
        let json = serde_json::to_string_pretty(&state.snapshot())
            .context("serializing snapshot")?;
        println!("{json}");
    }

    Ok(())
}
