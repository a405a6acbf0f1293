//! podset-quota CLI entrypoint.
//!
//! This is the main entrypoint for the podset-quota command-line tool.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use podset_quota::cli::{Cli, Commands, OutputFormatter};
use podset_quota::config::{ComparisonOptions, WorkloadParser, WorkloadValidator};
use podset_quota::equality::{ComparisonReport, QuotaHasher};
use podset_quota::error::Result;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<ExitCode> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Compare {
            old,
            new,
            ignore_tolerations,
            exit_code,
        } => cmd_compare(&old, &new, ignore_tolerations, exit_code, &formatter),
        Commands::Fingerprint {
            file,
            ignore_tolerations,
        } => cmd_fingerprint(&file, ignore_tolerations, &formatter),
        Commands::Validate { file, warnings } => cmd_validate(&file, warnings, &formatter),
    }
}

/// Compare two workloads.
fn cmd_compare(
    old_path: &Path,
    new_path: &Path,
    ignore_tolerations: bool,
    exit_code: bool,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    load_env_near(old_path)?;
    let options = ComparisonOptions::new(ignore_tolerations).with_env()?;

    let parser = WorkloadParser::new();
    let old = parser.load_file(old_path)?;
    let new = parser.load_file(new_path)?;
    info!(
        "Comparing {} ({} pod sets) with {} ({} pod sets)",
        old.display_name(),
        old.pod_sets().len(),
        new.display_name(),
        new.pod_sets().len()
    );

    let report = ComparisonReport::build(old.pod_sets(), new.pod_sets(), options.ignore_tolerations);
    debug!("Comparison verdict: equivalent={}", report.equivalent);
    write_stdout(&formatter.format_comparison(&report))?;

    if exit_code && !report.equivalent {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print fingerprints of a workload.
fn cmd_fingerprint(
    path: &Path,
    ignore_tolerations: bool,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    load_env_near(path)?;
    let options = ComparisonOptions::new(ignore_tolerations).with_env()?;

    let workload = WorkloadParser::new().load_file(path)?;
    let hasher = QuotaHasher::new();
    write_stdout(&formatter.format_fingerprints(&workload, &hasher, options.ignore_tolerations))?;

    Ok(ExitCode::SUCCESS)
}

/// Validate a workload.
fn cmd_validate(path: &Path, show_warnings: bool, formatter: &OutputFormatter) -> Result<ExitCode> {
    info!("Validating workload: {}", path.display());

    let workload = WorkloadParser::new().load_file(path)?;

    let validator = WorkloadValidator::new();
    let result = validator.check(&workload);
    write_stdout(&formatter.format_validation(&result, show_warnings))?;

    eprintln!("\nWorkload summary:");
    eprintln!("  Name: {}", workload.display_name());
    eprintln!("  Pod sets: {}", workload.pod_sets().len());
    eprintln!("  Total pods: {}", workload.total_pods());

    if result.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads the `.env` file from the directory of the given workload file.
fn load_env_near(path: &Path) -> Result<()> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    debug!("Using base directory: {}", base.display());
    WorkloadParser::new().with_base_path(base).load_dotenv()
}

/// Writes rendered output to stdout.
fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}
