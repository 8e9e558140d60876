//! Runs a game for many ticks.
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::BoardError;
use crate::food::{FoodPlacer, RandomFood};
use crate::state::{GameState, TickSummary};
use crate::types::{NoopInstruments, SimulatorInstruments};

/// How long a run goes on for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// upper bound on the number of ticks
    pub max_ticks: u64,
    /// end the run early once every snake is dead
    pub stop_when_all_dead: bool,
    /// seed for random food placement, fresh entropy when missing
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_ticks: 100,
            stop_when_all_dead: true,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Parse a config, any missing field takes its default. Both the object
    /// form and serde's positional array form are accepted.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// the random food placer this config asks for
    pub fn food(&self) -> RandomFood {
        match self.seed {
            Some(seed) => RandomFood::seeded(seed),
            None => RandomFood::from_entropy(),
        }
    }
}

/// Totals over every tick of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// ticks actually played
    pub ticks: u64,
    #[allow(missing_docs)]
    pub moved: usize,
    #[allow(missing_docs)]
    pub grew: usize,
    #[allow(missing_docs)]
    pub died: usize,
    #[allow(missing_docs)]
    pub food_failures: usize,
    /// snakes still alive when the run ended
    pub alive: usize,
}

impl RunSummary {
    fn record(&mut self, tick: &TickSummary) {
        self.ticks += 1;
        self.moved += tick.moved;
        self.grew += tick.grew;
        self.died += tick.died;
        self.food_failures += tick.food_failures;
    }
}

/// Ticks `state` until the tick budget runs out or, if the config asks for
/// it, no snake is left alive
pub fn run<F>(
    state: &mut GameState,
    config: &SimConfig,
    food: &mut F,
) -> Result<RunSummary, BoardError>
where
    F: FoodPlacer + ?Sized,
{
    run_with_instruments(state, config, food, &NoopInstruments)
}

/// [run], reporting every tick's duration to `instruments`
#[instrument(level = "trace", skip_all)]
pub fn run_with_instruments<F, I>(
    state: &mut GameState,
    config: &SimConfig,
    food: &mut F,
    instruments: &I,
) -> Result<RunSummary, BoardError>
where
    F: FoodPlacer + ?Sized,
    I: SimulatorInstruments,
{
    let mut summary = RunSummary::default();
    while summary.ticks < config.max_ticks {
        if config.stop_when_all_dead && state.is_over() {
            break;
        }
        let tick = state.tick_with_instruments(food, instruments)?;
        summary.record(&tick);
    }
    summary.alive = state.alive_snake_count();

    info!(
        ticks = summary.ticks,
        grew = summary.grew,
        died = summary.died,
        alive = summary.alive,
        "run finished"
    );
    Ok(summary)
}
