//! Review daemon library exports.
//!
//! This crate provides the CLI binary for the empathetic code reviewer.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (start, demo, review)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    build_assembler, load_review_input, render_review, run_demo, run_review, sample_review_input,
    start_server,
};
