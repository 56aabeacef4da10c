use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kanadojo-cli", version, about = "KanaDojo CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/kanadojo/config.toml
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Replay a sequence of answers through the reverse-mode scheduler
    Replay(commands::replay::ReplayArgs),
    /// Evaluate scheduler settings against a simulated learner
    Simulate(commands::simulate::SimulateArgs),
}

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = commands::ConfigStore::new(cli.config_path);
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(&store, action),
        Commands::Replay(args) => commands::replay::run(&store, args),
        Commands::Simulate(args) => commands::simulate::run(&store, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
