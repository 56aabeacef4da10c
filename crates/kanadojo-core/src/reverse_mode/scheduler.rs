//! Adaptive reverse-mode scheduler.
//!
//! Decides, after every correct answer, whether the next question is asked
//! in forward (prompt -> answer) or reverse (answer -> prompt) direction.
//! The reverse probability ramps up with the correctness streak and is
//! capped; every `force_switch_interval` correct answers the mode flips
//! regardless of the draw so a strong learner never stays in one direction.
//!
//! Wrong answers only reset the streak. The mode stays as it was until the
//! next correct answer re-evaluates it.

use std::fmt;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::config::{reverse_probability, SchedulerConfig};
use crate::error::SchedulerError;

/// Question direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Prompt -> answer (e.g. kana shown, romaji picked)
    #[default]
    Forward,
    /// Answer -> prompt (e.g. romaji shown, kana picked)
    Reverse,
}

impl Mode {
    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Mode::Forward => Mode::Reverse,
            Mode::Reverse => Mode::Forward,
        }
    }

    /// Whether questions are asked answer -> prompt.
    pub fn is_reverse(self) -> bool {
        self == Mode::Reverse
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Mode::Forward => "forward",
            Mode::Reverse => "reverse",
        })
    }
}

/// Outcome of one [`ModeScheduler::on_correct`] call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeDecision {
    /// Streak length after counting this answer
    pub streak: u64,

    /// Reverse probability for this streak (ignored when `forced`)
    pub probability: f64,

    /// Whether the streak hit the force-switch interval
    pub forced: bool,

    /// Mode for the next question
    pub mode: Mode,
}

/// Per-session direction scheduler.
///
/// Owns its RNG stream. Mutation needs `&mut self`, so a host sharing one
/// across threads has to serialize access itself.
#[derive(Debug, Clone)]
pub struct ModeScheduler {
    config: SchedulerConfig,
    consecutive_correct: u64,
    current_mode: Mode,
    rng: Mcg128Xsl64,
}

impl ModeScheduler {
    /// Create a scheduler for a new session, starting in [`Mode::Forward`].
    ///
    /// With `seed` the probabilistic branch is reproducible; without, the RNG
    /// is seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: SchedulerConfig, seed: Option<u64>) -> Result<Self, SchedulerError> {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "rejected reverse-mode scheduler config");
            return Err(err);
        }

        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };

        Ok(Self {
            config,
            consecutive_correct: 0,
            current_mode: Mode::Forward,
            rng,
        })
    }

    /// Mode to use for the next question.
    pub fn current_mode(&self) -> Mode {
        self.current_mode
    }

    /// Correct answers since the last wrong answer or session start.
    pub fn consecutive_correct(&self) -> u64 {
        self.consecutive_correct
    }

    /// Record a wrong answer: the streak resets, the mode is kept.
    pub fn on_wrong(&mut self) {
        if self.consecutive_correct > 0 {
            tracing::debug!(
                streak = self.consecutive_correct,
                mode = %self.current_mode,
                "streak reset by wrong answer"
            );
        }
        self.consecutive_correct = 0;
    }

    /// Record a correct answer and pick the mode for the next question.
    ///
    /// A forced turn inverts the mode without consuming a random draw.
    /// Otherwise the mode is re-rolled independently, so it may stay put.
    pub fn on_correct(&mut self) -> ModeDecision {
        self.consecutive_correct = self.consecutive_correct.saturating_add(1);
        let streak = self.consecutive_correct;

        let probability = reverse_probability(&self.config, streak);
        let forced = streak % u64::from(self.config.force_switch_interval) == 0;

        self.current_mode = if forced {
            self.current_mode.toggle()
        } else if self.rng.gen::<f64>() < probability {
            Mode::Reverse
        } else {
            Mode::Forward
        };

        tracing::debug!(
            streak,
            probability,
            forced,
            mode = %self.current_mode,
            "next question mode decided"
        );

        ModeDecision {
            streak,
            probability,
            forced,
            mode: self.current_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scheduler(base: f64, increment: f64, max: f64, interval: u32, seed: u64) -> ModeScheduler {
        let config = SchedulerConfig {
            base_probability: base,
            increment_per_correct: increment,
            max_probability: max,
            force_switch_interval: interval,
        };
        ModeScheduler::new(config, Some(seed)).unwrap()
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(Mode::Forward.toggle(), Mode::Reverse);
        assert_eq!(Mode::Reverse.toggle(), Mode::Forward);
        assert!(Mode::Reverse.is_reverse());
        assert_eq!(Mode::Reverse.to_string(), "reverse");
    }

    #[test]
    fn test_new_session_starts_forward() {
        let s = ModeScheduler::new(SchedulerConfig::default(), None).unwrap();
        assert_eq!(s.current_mode(), Mode::Forward);
        assert_eq!(s.consecutive_correct(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SchedulerConfig {
            base_probability: 0.6,
            max_probability: 0.5,
            ..Default::default()
        };
        let err = ModeScheduler::new(config, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidConfig { field: "max_probability", .. }
        ));

        let config = SchedulerConfig {
            force_switch_interval: 0,
            ..Default::default()
        };
        assert!(ModeScheduler::new(config, Some(1)).is_err());
    }

    #[test]
    fn test_zero_probability_only_forced_flips() {
        // p = 0 keeps every sampled turn Forward; only multiples of 3 flip
        let mut s = scheduler(0.0, 0.0, 0.0, 3, 7);
        let modes: Vec<Mode> = (0..6).map(|_| s.on_correct().mode).collect();
        assert_eq!(
            modes,
            vec![
                Mode::Forward,
                Mode::Forward,
                Mode::Reverse,
                Mode::Forward,
                Mode::Forward,
                Mode::Reverse,
            ]
        );
    }

    #[test]
    fn test_certain_probability_always_reverse_unless_forced() {
        let mut s = scheduler(1.0, 0.0, 1.0, 4, 7);
        for _ in 0..3 {
            assert_eq!(s.on_correct().mode, Mode::Reverse);
        }
        let decision = s.on_correct();
        assert!(decision.forced);
        assert_eq!(decision.mode, Mode::Forward);
    }

    #[test]
    fn test_interval_one_flips_every_correct_answer() {
        let mut s = scheduler(0.15, 0.08, 0.5, 1, 99);
        let mut expected = Mode::Forward;
        for _ in 0..10 {
            expected = expected.toggle();
            let decision = s.on_correct();
            assert!(decision.forced);
            assert_eq!(decision.mode, expected);
        }
    }

    #[test]
    fn test_wrong_answer_keeps_mode_and_resets_streak() {
        let mut s = scheduler(0.15, 0.08, 0.5, 3, 11);
        for _ in 0..3 {
            s.on_correct();
        }
        let before = s.current_mode();
        s.on_wrong();
        assert_eq!(s.current_mode(), before);
        assert_eq!(s.consecutive_correct(), 0);
        s.on_wrong();
        assert_eq!(s.current_mode(), before);
    }

    #[test]
    fn test_reset_streak_matches_fresh_probability() {
        let mut fresh = scheduler(0.15, 0.08, 0.5, 3, 5);
        let mut used = scheduler(0.15, 0.08, 0.5, 3, 5);
        for _ in 0..4 {
            used.on_correct();
        }
        used.on_wrong();

        let a = fresh.on_correct();
        let b = used.on_correct();
        assert_eq!(a.streak, 1);
        assert_eq!(b.streak, 1);
        assert_eq!(a.probability, b.probability);
    }

    #[test]
    fn test_default_config_scenario() {
        let mut s = scheduler(0.15, 0.08, 0.5, 3, 42);
        assert_eq!(s.current_mode(), Mode::Forward);

        s.on_correct();
        let before_third = s.on_correct().mode;
        let third = s.on_correct();
        assert!(third.forced);
        assert_eq!(third.mode, before_third.toggle());

        s.on_wrong();
        assert_eq!(s.current_mode(), third.mode);

        let fifth = s.on_correct();
        assert_eq!(fifth.streak, 1);
        assert!(!fifth.forced);
        assert!((fifth.probability - 0.23).abs() < 1e-12);
    }

    #[test]
    fn test_forced_turn_does_not_consume_draw() {
        // Interval 2 forces every even turn; interval MAX never forces.
        // The odd turns of the first must line up with consecutive draws of the second.
        let mut forcing = scheduler(0.5, 0.0, 0.5, 2, 3);
        let mut sampling = scheduler(0.5, 0.0, 0.5, u32::MAX, 3);
        for _ in 0..20 {
            let sampled = forcing.on_correct();
            forcing.on_correct();
            assert_eq!(sampled.mode, sampling.on_correct().mode);
        }
    }

    #[test]
    fn test_streak_is_not_capped() {
        let mut s = scheduler(0.15, 0.08, 0.5, 3, 1);
        for _ in 0..1000 {
            s.on_correct();
        }
        assert_eq!(s.consecutive_correct(), 1000);
        assert_eq!(s.on_correct().probability, 0.5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_same_seed_same_modes(
            seed in any::<u64>(),
            answers in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut a = scheduler(0.15, 0.08, 0.5, 3, seed);
            let mut b = scheduler(0.15, 0.08, 0.5, 3, seed);
            for correct in answers {
                if correct {
                    a.on_correct();
                    b.on_correct();
                } else {
                    a.on_wrong();
                    b.on_wrong();
                }
                prop_assert_eq!(a.current_mode(), b.current_mode());
                prop_assert_eq!(a.consecutive_correct(), b.consecutive_correct());
            }
        }

        #[test]
        fn prop_forced_flip_bounds_mode_runs(
            seed in any::<u64>(),
            interval in 1u32..8,
            base in 0.0f64..=1.0,
            prefix in proptest::collection::vec(any::<bool>(), 0..30),
        ) {
            let mut s = scheduler(base, 0.0, base, interval, seed);
            for correct in prefix {
                if correct { s.on_correct(); } else { s.on_wrong(); }
            }

            let start = s.current_mode();
            let mut flipped = false;
            for _ in 0..interval {
                if s.on_correct().mode != start {
                    flipped = true;
                }
            }
            prop_assert!(flipped);
        }

        #[test]
        fn prop_wrong_never_changes_mode(
            seed in any::<u64>(),
            answers in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let mut s = scheduler(0.15, 0.08, 0.5, 3, seed);
            for correct in answers {
                if correct {
                    s.on_correct();
                } else {
                    let before = s.current_mode();
                    s.on_wrong();
                    prop_assert_eq!(s.current_mode(), before);
                    prop_assert_eq!(s.consecutive_correct(), 0);
                }
            }
        }
    }
}
