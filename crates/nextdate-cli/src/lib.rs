//! Command-line front end for the nextdate recurrence engine
//!
//! This crate provides the `nextdate` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use error::{CliError, CliResult};
