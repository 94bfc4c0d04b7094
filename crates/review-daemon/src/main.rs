//! Empathetic Code Reviewer
//!
//! Turns blunt code review comments into constructive, educational feedback.
//!
//! # Usage
//!
//! ```bash
//! review-daemon start [--host HOST] [--port PORT]
//! review-daemon demo [--offline] [--output PATH]
//! review-daemon review --input PATH [--offline]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/empathetic-review/config.toml)
//! 3. Environment variables (REVIEW_*, plus GEMINI_API_KEY for the credential)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use review_daemon::{run_demo, run_review, start_server, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start { host, port } => {
            start_server(
                cli.config.as_deref(),
                host.as_deref(),
                port,
                cli.log_level.as_deref(),
            )
            .await?;
        }
        Commands::Demo { offline, output } => {
            run_demo(
                cli.config.as_deref(),
                offline,
                &output,
                cli.log_level.as_deref(),
            )
            .await?;
        }
        Commands::Review { input, offline } => {
            run_review(
                cli.config.as_deref(),
                &input,
                offline,
                cli.log_level.as_deref(),
            )
            .await?;
        }
    }

    Ok(())
}
