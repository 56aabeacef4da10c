//! Tunable parameters for reverse-mode scheduling.

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Parameters of the adaptive reverse-mode scheduler.
///
/// Supplied once per session. Missing fields fall back to the defaults when
/// deserialized from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Reverse probability with an empty streak (0.0-1.0)
    #[serde(default = "default_base_probability")]
    pub base_probability: f64,

    /// Probability added per consecutive correct answer
    #[serde(default = "default_increment_per_correct")]
    pub increment_per_correct: f64,

    /// Saturation ceiling for the reverse probability (0.0-1.0)
    #[serde(default = "default_max_probability")]
    pub max_probability: f64,

    /// Every Nth consecutive correct answer flips the mode unconditionally
    #[serde(default = "default_force_switch_interval")]
    pub force_switch_interval: u32,
}

fn default_base_probability() -> f64 {
    0.15
}
fn default_increment_per_correct() -> f64 {
    0.08
}
fn default_max_probability() -> f64 {
    0.5
}
fn default_force_switch_interval() -> u32 {
    3
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            base_probability: default_base_probability(),
            increment_per_correct: default_increment_per_correct(),
            max_probability: default_max_probability(),
            force_switch_interval: default_force_switch_interval(),
        }
    }
}

impl SchedulerConfig {
    /// Check ranges and the `base_probability <= max_probability` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        check_unit_interval("base_probability", self.base_probability)?;
        check_unit_interval("max_probability", self.max_probability)?;

        if !self.increment_per_correct.is_finite() || self.increment_per_correct < 0.0 {
            return Err(invalid(
                "increment_per_correct",
                format!("must be a finite value >= 0, got {}", self.increment_per_correct),
            ));
        }

        if self.force_switch_interval < 1 {
            return Err(invalid("force_switch_interval", "must be at least 1".to_string()));
        }

        if self.base_probability > self.max_probability {
            return Err(invalid(
                "max_probability",
                format!(
                    "must be >= base_probability ({} > {})",
                    self.base_probability, self.max_probability
                ),
            ));
        }

        Ok(())
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), SchedulerError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

fn invalid(field: &'static str, message: String) -> SchedulerError {
    SchedulerError::InvalidConfig { field, message }
}

/// Reverse-mode probability after a streak of `streak` correct answers.
///
/// Non-decreasing in `streak` and never above `max_probability`.
pub fn reverse_probability(config: &SchedulerConfig, streak: u64) -> f64 {
    let raw = config.base_probability + streak as f64 * config.increment_per_correct;
    raw.min(config.max_probability)
}
