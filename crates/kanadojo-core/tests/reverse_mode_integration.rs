//! Integration tests for reverse-mode scheduling through the public API.

use kanadojo_core::{
    reverse_probability, Config, Mode, ModeScheduler, SchedulerConfig, SchedulerError,
    SessionSimulator, SimulationConfig,
};

fn drill_config() -> SchedulerConfig {
    SchedulerConfig {
        base_probability: 0.15,
        increment_per_correct: 0.08,
        max_probability: 0.5,
        force_switch_interval: 3,
    }
}

#[test]
fn test_quiz_session_walkthrough() {
    let mut scheduler = ModeScheduler::new(drill_config(), Some(2024)).unwrap();
    assert_eq!(scheduler.current_mode(), Mode::Forward);

    // Three correct answers in a row: the third one forces a flip
    scheduler.on_correct();
    let second = scheduler.on_correct();
    let third = scheduler.on_correct();
    assert_eq!(third.streak, 3);
    assert!(third.forced);
    assert_eq!(third.mode, second.mode.toggle());
    assert_eq!(scheduler.current_mode(), third.mode);

    // A wrong answer keeps the direction of the question that was missed
    scheduler.on_wrong();
    assert_eq!(scheduler.current_mode(), third.mode);
    assert_eq!(scheduler.consecutive_correct(), 0);

    // The next correct answer starts the ramp over
    let fifth = scheduler.on_correct();
    assert_eq!(fifth.streak, 1);
    assert!((fifth.probability - 0.23).abs() < 1e-12);
    assert_eq!(fifth.probability, reverse_probability(&drill_config(), 1));
}

#[test]
fn test_identical_seeds_replay_identically() {
    let answers = "ccwcccwwcccccwcccccccwc";
    let replay = |seed| {
        let mut scheduler = ModeScheduler::new(drill_config(), Some(seed)).unwrap();
        answers
            .chars()
            .map(|answer| {
                if answer == 'c' {
                    scheduler.on_correct();
                } else {
                    scheduler.on_wrong();
                }
                scheduler.current_mode()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(replay(77), replay(77));
}

#[test]
fn test_construction_validation() {
    let inverted = SchedulerConfig {
        base_probability: 0.6,
        max_probability: 0.5,
        ..drill_config()
    };
    assert!(matches!(
        ModeScheduler::new(inverted, None),
        Err(SchedulerError::InvalidConfig { .. })
    ));

    let never_forced = SchedulerConfig {
        force_switch_interval: 0,
        ..drill_config()
    };
    assert!(matches!(
        ModeScheduler::new(never_forced, None),
        Err(SchedulerError::InvalidConfig { field: "force_switch_interval", .. })
    ));
}

#[test]
fn test_config_file_drives_scheduler_and_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[reverse_mode]\nforce_switch_interval = 2\n\n[simulation]\nsessions = 20\nseed = 5\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let scheduler_config = config.scheduler_config().unwrap();
    assert_eq!(scheduler_config.force_switch_interval, 2);
    assert_eq!(scheduler_config.max_probability, 0.5);

    let report = SessionSimulator::with_config(config.simulation)
        .simulate(&scheduler_config)
        .unwrap();
    assert_eq!(report.sessions, 20);
    assert_eq!(report.questions, 20 * SimulationConfig::default().answers_per_session);
    assert!(report.longest_mode_run <= 2);
    assert!(report.reverse_share > 0.0 && report.reverse_share < 1.0);
}
