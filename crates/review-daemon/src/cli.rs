//! CLI argument parsing for the review daemon.
//!
//! CLI flags override every other configuration source.

use clap::{Parser, Subcommand};

/// Empathetic Code Reviewer
///
/// Rewrites blunt code review comments into constructive, educational feedback.
#[derive(Parser, Debug)]
#[command(name = "review-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/empathetic-review/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Daemon commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Override bind host
        #[arg(long)]
        host: Option<String>,

        /// Override HTTP port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Review the built-in sample and write the report to a file
    Demo {
        /// Use the local hashing embedder and mock generator (no API key needed)
        #[arg(long)]
        offline: bool,

        /// Where to write the report
        #[arg(short, long, default_value = "empathetic_review_report.md")]
        output: String,
    },

    /// Review a JSON file of {code_snippet, review_comments, language?}
    Review {
        /// Input JSON file
        #[arg(short, long)]
        input: String,

        /// Use the local hashing embedder and mock generator (no API key needed)
        #[arg(long)]
        offline: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_start_defaults() {
        let cli = Cli::parse_from(["review-daemon", "start"]);
        match cli.command {
            Commands::Start { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, None);
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_start_with_overrides() {
        let cli = Cli::parse_from(["review-daemon", "start", "--host", "127.0.0.1", "-p", "9000"]);
        match cli.command {
            Commands::Start { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("Expected Start command"),
        }
    }

    #[test]
    fn test_cli_demo_default_output() {
        let cli = Cli::parse_from(["review-daemon", "demo", "--offline"]);
        match cli.command {
            Commands::Demo { offline, output } => {
                assert!(offline);
                assert_eq!(output, "empathetic_review_report.md");
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_review() {
        let cli = Cli::parse_from(["review-daemon", "review", "--input", "request.json"]);
        match cli.command {
            Commands::Review { input, offline } => {
                assert_eq!(input, "request.json");
                assert!(!offline);
            }
            _ => panic!("Expected Review command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "review-daemon",
            "demo",
            "--config",
            "/path/to/config.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_review_requires_input() {
        assert!(Cli::try_parse_from(["review-daemon", "review"]).is_err());
    }
}
