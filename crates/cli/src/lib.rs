pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "cardwise",
    about = "Cardwise operator CLI",
    long_about = "Inspect Cardwise configuration, check runtime readiness, and score profiles against the card catalog.",
    after_help = "Examples:\n  cardwise doctor --json\n  cardwise config\n  cardwise recommend --income 50000 --spending travel --benefits \"lounge access\" --cards yes --score good"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, catalog readability, and oracle client readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Rank the catalog against a fully-specified profile, bypassing the conversation"
    )]
    Recommend(commands::recommend::RecommendArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Recommend(args) => commands::recommend::run(args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
