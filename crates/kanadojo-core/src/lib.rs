//! # KanaDojo Core Library
//!
//! This library provides the drill-session logic behind KanaDojo's kana,
//! kanji and vocabulary quizzes. It follows a CLI-first philosophy: every
//! operation is available through the standalone `kanadojo-cli` binary,
//! and any other front end is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Reverse Mode**: Adaptive scheduler that picks the direction of the
//!   next question from the learner's correctness streak
//! - **Simulation**: Seeded Monte Carlo runs of scheduler settings against a
//!   simulated learner
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ModeScheduler`]: Per-session direction state machine
//! - [`SchedulerConfig`]: Scheduler parameters
//! - [`SessionSimulator`]: Offline evaluation of a configuration
//! - [`Config`]: Application configuration management

pub mod error;
pub mod reverse_mode;
pub mod simulation;
pub mod storage;

pub use error::{ConfigError, CoreError, SchedulerError, ValidationError};
pub use reverse_mode::{reverse_probability, Mode, ModeDecision, ModeScheduler, SchedulerConfig};
pub use simulation::{SessionSimulator, SimulationConfig, SimulationReport};
pub use storage::Config;
