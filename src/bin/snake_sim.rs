use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use num_format::{Locale, ToFormattedString};
use snake_grid_engine::sim::{self, SimConfig};
use snake_grid_engine::types::SimulatorInstruments;
use snake_grid_engine::GameState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake-sim")]
#[command(version, about = "Advance a snake board tick by tick")]
struct Cli {
    /// Board text file to start from, the built in board when missing
    #[arg(long)]
    board: Option<PathBuf>,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of ticks, overrides the config
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for food placement, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final board to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit a JSON snapshot with snake records instead of board text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default)]
struct TickTimer {
    ticks: Cell<u64>,
    total: Cell<Duration>,
}

impl SimulatorInstruments for TickTimer {
    fn observe_simulation(&self, duration: Duration) {
        self.ticks.set(self.ticks.get() + 1);
        self.total.set(self.total.get() + duration);
    }
}

impl TickTimer {
    fn average_nanos(&self) -> u128 {
        self.total.get().as_nanos() / u128::from(self.ticks.get().max(1))
    }
}

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            SimConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(ticks) = cli.ticks {
        config.max_ticks = ticks;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut state = match &cli.board {
        Some(path) => GameState::load(path)
            .with_context(|| format!("loading board {}", path.display()))?,
        None => GameState::default_state(),
    };

    let timer = TickTimer::default();
    let summary = sim::run_with_instruments(&mut state, &config, &mut config.food(), &timer)
        .context("board became inconsistent during the run")?;

    info!(
        ticks = %summary.ticks.to_formatted_string(&Locale::en),
        moved = summary.moved,
        grew = summary.grew,
        died = summary.died,
        food_failures = summary.food_failures,
        alive = summary.alive,
        avg_tick_ns = %timer.average_nanos().to_formatted_string(&Locale::en),
        "simulation done"
    );

    match (&cli.out, cli.json) {
        (Some(path), false) => state
            .save(path)
            .with_context(|| format!("saving board {}", path.display()))?,
        (Some(path), true) => fs::write(path, state.to_json()?)
            .with_context(|| format!("saving snapshot {}", path.display()))?,
        (None, false) => state.write_board(&mut io::stdout().lock())?,
        (None, true) => writeln!(io::stdout().lock(), "{}", state.to_json()?)?,
    }
    Ok(())
}
