//! CLI module for the pod set quota tool.
//!
//! This module provides the command-line interface for comparing,
//! fingerprinting and validating workload documents.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
