use clap::Args;
use kanadojo_core::{Mode, ModeScheduler};
use serde::Serialize;

use super::{ConfigStore, SchedulerOverrides};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Answers in order: 'c' for correct, 'w' for wrong (e.g. "ccwccc")
    pub answers: String,
    /// Seed for the scheduler RNG
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub overrides: SchedulerOverrides,
}

/// One answered question in a replay.
#[derive(Debug, Serialize)]
struct ReplayStep {
    question: usize,
    mode: Mode,
    correct: bool,
    streak: u64,
    /// Only set for correct answers
    probability: Option<f64>,
    forced: bool,
    next_mode: Mode,
}

fn parse_answers(answers: &str) -> Result<Vec<bool>, String> {
    answers
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_lowercase() {
            'c' => Ok(true),
            'w' => Ok(false),
            other => Err(format!("invalid answer '{other}': expected 'c' or 'w'")),
        })
        .collect()
}

pub fn run(store: &ConfigStore, args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let answers = parse_answers(&args.answers)?;
    let config = args.overrides.apply(store.load()?.reverse_mode);
    let mut scheduler = ModeScheduler::new(config, args.seed)?;

    let mut steps = Vec::with_capacity(answers.len());
    for (idx, correct) in answers.into_iter().enumerate() {
        let mode = scheduler.current_mode();
        let step = if correct {
            let decision = scheduler.on_correct();
            ReplayStep {
                question: idx + 1,
                mode,
                correct,
                streak: decision.streak,
                probability: Some(decision.probability),
                forced: decision.forced,
                next_mode: decision.mode,
            }
        } else {
            scheduler.on_wrong();
            ReplayStep {
                question: idx + 1,
                mode,
                correct,
                streak: scheduler.consecutive_correct(),
                probability: None,
                forced: false,
                next_mode: scheduler.current_mode(),
            }
        };
        steps.push(step);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }

    for step in &steps {
        let verdict = if step.correct { "correct" } else { "wrong" };
        let detail = match step.probability {
            Some(_) if step.forced => "forced flip".to_string(),
            Some(p) => format!("p(reverse)={p:.2}"),
            None => "streak reset".to_string(),
        };
        println!(
            "#{:<3} {:<7} {:<7} streak={:<3} {:<16} next={}",
            step.question, step.mode, verdict, step.streak, detail, step.next_mode
        );
    }
    Ok(())
}
