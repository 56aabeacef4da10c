mod config;
mod scheduler;

pub use config::{reverse_probability, SchedulerConfig};
pub use scheduler::{Mode, ModeDecision, ModeScheduler};
