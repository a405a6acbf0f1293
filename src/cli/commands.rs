//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// podset-quota - Quota equivalence checks for workload pod sets.
#[derive(Parser, Debug)]
#[command(name = "podset-quota")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether two workloads are quota-equivalent.
    Compare {
        /// Workload before the update.
        old: PathBuf,

        /// Workload after the update.
        new: PathBuf,

        /// Exclude tolerations from the comparison.
        #[arg(long)]
        ignore_tolerations: bool,

        /// Exit with status 1 when the workloads are not equivalent.
        #[arg(long)]
        exit_code: bool,
    },

    /// Print quota fingerprints of a workload's pod sets.
    Fingerprint {
        /// Workload file.
        file: PathBuf,

        /// Exclude tolerations from the fingerprint.
        #[arg(long)]
        ignore_tolerations: bool,
    },

    /// Validate a workload document.
    Validate {
        /// Workload file.
        file: PathBuf,

        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}
