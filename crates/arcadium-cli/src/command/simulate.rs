use std::path::PathBuf;

use anyhow::Context as _;
use arcadium_engine::SimSeed;
use arcadium_evaluator::{
    ConstantPolicy, DEFAULT_FRAME_LIMIT, SessionEvaluator, SessionOutcome,
};
use arcadium_stats::DescriptiveStats;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Which game to simulate
    #[arg(long, value_enum)]
    game: Game,
    /// Stub policy driving the agent
    #[arg(long, value_enum, default_value_t = PolicyKind::Never)]
    policy: PolicyKind,
    /// Simulation seed as a 32-character hex string (random if omitted)
    #[arg(long)]
    seed: Option<SimSeed>,
    /// Frame budget per run
    #[arg(long, default_value_t = DEFAULT_FRAME_LIMIT)]
    frames: u32,
    /// Number of runs; seeds after the first derive from the base seed
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Game {
    Runner,
    Flight,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum PolicyKind {
    /// Act (jump or flap) every frame
    Always,
    /// Never act
    Never,
}

impl PolicyKind {
    fn instantiate(self) -> ConstantPolicy {
        match self {
            PolicyKind::Always => ConstantPolicy::ALWAYS,
            PolicyKind::Never => ConstantPolicy::NEVER,
        }
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    seed: SimSeed,
    #[serde(flatten)]
    outcome: SessionOutcome,
}

#[derive(Debug, Serialize)]
struct FitnessSummary {
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    std_dev: f64,
}

impl From<DescriptiveStats> for FitnessSummary {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulateReport {
    game: Game,
    policy: PolicyKind,
    frame_limit: u32,
    base_seed: SimSeed,
    runs: Vec<RunReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fitness_summary: Option<FitnessSummary>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    anyhow::ensure!(arg.runs >= 1, "--runs must be at least 1");

    // Print the base seed even when it was sampled, so any batch can be
    // reproduced from the report alone
    let base_seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut seed_rng = Pcg32::from_seed(base_seed.to_bytes());
    let evaluator = SessionEvaluator::new(arg.frames);
    let policy = arg.policy.instantiate();

    let mut runs = Vec::with_capacity(arg.runs as usize);
    for index in 0..arg.runs {
        let seed = if index == 0 {
            base_seed
        } else {
            seed_rng.random()
        };
        let outcome = match arg.game {
            Game::Runner => evaluator.run_runner(&policy, seed),
            Game::Flight => evaluator.run_flight(&policy, seed),
        }
        .context("policy evaluation failed")?;
        runs.push(RunReport { seed, outcome });
    }

    let fitness_summary = if runs.len() > 1 {
        DescriptiveStats::new(runs.iter().map(|run| f64::from(run.outcome.fitness)))
            .map(FitnessSummary::from)
    } else {
        None
    };

    let report = SimulateReport {
        game: arg.game,
        policy: arg.policy,
        frame_limit: arg.frames,
        base_seed,
        runs,
        fitness_summary,
    };
    Output::save_json(&report, arg.output.clone())
}
