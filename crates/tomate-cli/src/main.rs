mod client;
mod commands;
mod daemon_launcher;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tomate")]
#[command(about = "Tomate CLI - Control the pomodoro timer daemon", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the timer
    Start,
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    #[command(alias = "continue")]
    Resume,
    /// Reset to the first task of the loop
    Stop,
    /// Skip to the next stage
    Next,
    /// Show the current timer state
    Status {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
        /// Keep printing until interrupted
        #[arg(long)]
        watch: bool,
    },
    /// Show or change the stage durations
    Settings {
        /// Task duration in minutes
        #[arg(long)]
        task: Option<u32>,
        /// Break duration in minutes
        #[arg(long = "break")]
        break_time: Option<u32>,
    },
    /// Launch the daemon in the background
    Daemon,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => commands::start().await,
        Commands::Pause => commands::pause().await,
        Commands::Resume => commands::resume().await,
        Commands::Stop => commands::stop().await,
        Commands::Next => commands::next().await,
        Commands::Status { json, watch } => commands::status(json, watch).await,
        Commands::Settings { task, break_time } => commands::settings(task, break_time).await,
        Commands::Daemon => commands::daemon().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_is_an_alias_for_resume() {
        let cli = Cli::try_parse_from(["tomate", "continue"]).unwrap();

        assert!(matches!(cli.command, Commands::Resume));
    }

    #[test]
    fn parses_settings_flags() {
        let cli = Cli::try_parse_from(["tomate", "settings", "--task", "50", "--break", "10"]).unwrap();

        match cli.command {
            Commands::Settings { task, break_time } => {
                assert_eq!(task, Some(50));
                assert_eq!(break_time, Some(10));
            }
            _ => panic!("expected settings"),
        }
    }
}
