//! CLI module
//!
//! Command-line interface for running jobs.
//!
//! # Commands
//!
//! - `run` - Run a job's paginated fetch and print the items
//! - `validate` - Load and validate a job file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{run_job, Runner};
