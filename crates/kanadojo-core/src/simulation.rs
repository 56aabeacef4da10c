//! Monte Carlo evaluation of reverse-mode scheduler settings.
//!
//! Runs many simulated drill sessions against a learner who answers
//! correctly with a fixed probability, and summarizes how often questions
//! end up reversed and how long the scheduler lets one direction persist.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::reverse_mode::{Mode, ModeScheduler, SchedulerConfig};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent sessions
    #[serde(default = "default_sessions")]
    pub sessions: usize,

    /// Questions answered per session
    #[serde(default = "default_answers_per_session")]
    pub answers_per_session: usize,

    /// Probability that the simulated learner answers correctly (0.0-1.0)
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,

    /// Random seed for reproducibility (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_sessions() -> usize {
    200
}
fn default_answers_per_session() -> usize {
    50
}
fn default_accuracy() -> f64 {
    0.8
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sessions: default_sessions(),
            answers_per_session: default_answers_per_session(),
            accuracy: default_accuracy(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.sessions == 0 {
            return Err(invalid("sessions", "must be at least 1"));
        }
        if self.answers_per_session == 0 {
            return Err(invalid("answers_per_session", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(invalid("accuracy", "must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Aggregated outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub sessions: usize,

    /// Total questions asked across all sessions
    pub questions: usize,

    pub correct_answers: usize,

    /// Fraction of questions asked in reverse mode
    pub reverse_share: f64,

    /// Decisions made by the force-switch rule
    pub forced_flips: usize,

    /// Mean reverse probability over all correct-answer decisions
    pub mean_reverse_probability: f64,

    /// Longest streak reached in any session
    pub longest_streak: u64,

    /// Longest run of correctly answered questions sharing one mode.
    /// Never exceeds the force-switch interval.
    pub longest_mode_run: usize,
}

#[derive(Debug, Default)]
struct Tally {
    questions: usize,
    correct_answers: usize,
    reverse_questions: usize,
    forced_flips: usize,
    probability_sum: f64,
    longest_streak: u64,
    longest_mode_run: usize,
}

/// Drives simulated sessions through [`ModeScheduler`].
pub struct SessionSimulator {
    config: SimulationConfig,
}

impl SessionSimulator {
    /// Create a new simulator with default config.
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    /// Create a simulator with custom config.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Simulate `sessions` sessions under `scheduler_config`.
    ///
    /// Each session gets its own scheduler seeded from the master RNG, so a
    /// seeded run is fully reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid.
    pub fn simulate(&self, scheduler_config: &SchedulerConfig) -> Result<SimulationReport> {
        self.config.validate()?;
        scheduler_config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        let mut tally = Tally::default();
        for _ in 0..self.config.sessions {
            let scheduler_seed = rng.gen::<u64>();
            let learner_seed = rng.gen::<u64>();
            let scheduler = ModeScheduler::new(*scheduler_config, Some(scheduler_seed))?;
            self.run_single_session(
                scheduler,
                &mut Mcg128Xsl64::seed_from_u64(learner_seed),
                &mut tally,
            );
        }

        let decisions = tally.correct_answers;
        let report = SimulationReport {
            sessions: self.config.sessions,
            questions: tally.questions,
            correct_answers: tally.correct_answers,
            reverse_share: tally.reverse_questions as f64 / tally.questions as f64,
            forced_flips: tally.forced_flips,
            mean_reverse_probability: if decisions > 0 {
                tally.probability_sum / decisions as f64
            } else {
                0.0
            },
            longest_streak: tally.longest_streak,
            longest_mode_run: tally.longest_mode_run,
        };

        tracing::debug!(
            sessions = report.sessions,
            reverse_share = report.reverse_share,
            forced_flips = report.forced_flips,
            "simulation finished"
        );

        Ok(report)
    }

    /// Run one session, folding its counters into `tally`.
    fn run_single_session(
        &self,
        mut scheduler: ModeScheduler,
        learner: &mut Mcg128Xsl64,
        tally: &mut Tally,
    ) {
        let mut run: Option<(Mode, usize)> = None;

        for _ in 0..self.config.answers_per_session {
            let mode = scheduler.current_mode();
            tally.questions += 1;
            if mode.is_reverse() {
                tally.reverse_questions += 1;
            }

            if learner.gen::<f64>() >= self.config.accuracy {
                scheduler.on_wrong();
                run = None;
                continue;
            }

            let run_len = match run {
                Some((run_mode, len)) if run_mode == mode => len + 1,
                _ => 1,
            };
            run = Some((mode, run_len));
            tally.longest_mode_run = tally.longest_mode_run.max(run_len);

            let decision = scheduler.on_correct();
            tally.correct_answers += 1;
            tally.probability_sum += decision.probability;
            tally.longest_streak = tally.longest_streak.max(decision.streak);
            if decision.forced {
                tally.forced_flips += 1;
            }
        }
    }
}

impl Default for SessionSimulator {
    fn default() -> Self {
        Self::new()
    }
}
