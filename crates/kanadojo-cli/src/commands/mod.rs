pub mod config;
pub mod replay;
pub mod simulate;

use std::path::PathBuf;

use clap::Args;
use kanadojo_core::{Config, ConfigError, SchedulerConfig};

/// Where the CLI reads and writes its config file.
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        match &self.path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        match &self.path {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }
}

/// Per-invocation overrides of the `[reverse_mode]` config section.
#[derive(Args, Debug, Default)]
pub struct SchedulerOverrides {
    /// Reverse probability with an empty streak
    #[arg(long)]
    pub base: Option<f64>,
    /// Probability added per consecutive correct answer
    #[arg(long)]
    pub increment: Option<f64>,
    /// Probability ceiling
    #[arg(long)]
    pub max: Option<f64>,
    /// Force a mode flip every N consecutive correct answers
    #[arg(long)]
    pub interval: Option<u32>,
}

impl SchedulerOverrides {
    /// Apply the overrides on top of `base`. Validation happens when the
    /// scheduler is built.
    pub fn apply(&self, base: SchedulerConfig) -> SchedulerConfig {
        SchedulerConfig {
            base_probability: self.base.unwrap_or(base.base_probability),
            increment_per_correct: self.increment.unwrap_or(base.increment_per_correct),
            max_probability: self.max.unwrap_or(base.max_probability),
            force_switch_interval: self.interval.unwrap_or(base.force_switch_interval),
        }
    }
}
