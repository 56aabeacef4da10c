use clap::Args;
use kanadojo_core::{SessionSimulator, SimulationConfig};

use super::{ConfigStore, SchedulerOverrides};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Number of simulated sessions
    #[arg(long)]
    pub sessions: Option<usize>,
    /// Answers per session
    #[arg(long)]
    pub answers: Option<usize>,
    /// Probability that the simulated learner answers correctly
    #[arg(long)]
    pub accuracy: Option<f64>,
    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
    #[command(flatten)]
    pub overrides: SchedulerOverrides,
}

pub fn run(store: &ConfigStore, args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = store.load()?;
    let scheduler_config = args.overrides.apply(config.reverse_mode);

    let defaults = config.simulation;
    let simulation = SimulationConfig {
        sessions: args.sessions.unwrap_or(defaults.sessions),
        answers_per_session: args.answers.unwrap_or(defaults.answers_per_session),
        accuracy: args.accuracy.unwrap_or(defaults.accuracy),
        seed: args.seed.or(defaults.seed),
    };

    let report = SessionSimulator::with_config(simulation).simulate(&scheduler_config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
