//! Output formatting for CLI commands.
//!
//! This module renders comparison reports, fingerprints and validation
//! results as text tables or JSON.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::ValidationResult;
use crate::equality::{ComparisonReport, QuotaHasher};
use crate::model::Workload;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Per-index verdict row for table display.
#[derive(Tabled)]
struct VerdictRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Old")]
    old_name: String,
    #[tabled(rename = "New")]
    new_name: String,
    #[tabled(rename = "Verdict")]
    verdict: String,
}

/// Pod set fingerprint row for table display.
#[derive(Tabled, Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintRow {
    #[tabled(rename = "Pod set")]
    name: String,
    #[tabled(rename = "Count")]
    count: i32,
    #[tabled(rename = "Min")]
    min_count: String,
    #[tabled(rename = "Containers")]
    containers: String,
    #[tabled(rename = "Fingerprint")]
    fingerprint: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a comparison report for display.
    #[must_use]
    pub fn format_comparison(&self, report: &ComparisonReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Text => Self::format_comparison_text(report),
        }
    }

    /// Formats a report as text.
    fn format_comparison_text(report: &ComparisonReport) -> String {
        let mut output = String::new();

        let rows: Vec<VerdictRow> = report
            .pod_sets
            .iter()
            .map(|v| VerdictRow {
                index: v.index,
                old_name: v.old_name.clone().unwrap_or_else(|| String::from("-")),
                new_name: v.new_name.clone().unwrap_or_else(|| String::from("-")),
                verdict: match v.equivalent {
                    Some(true) => "equivalent".green().to_string(),
                    Some(false) => "changed".red().to_string(),
                    None => "unmatched".yellow().to_string(),
                },
            })
            .collect();

        if !rows.is_empty() {
            output.push_str(&Table::new(rows).to_string());
            output.push('\n');
        }

        if report.ignore_tolerations {
            let _ = writeln!(output, "Tolerations ignored.");
        }

        if report.equivalent {
            let _ = writeln!(
                output,
                "{} Pod sets are quota-equivalent; no re-evaluation needed.",
                "✓".green()
            );
        } else if report.length_mismatch() {
            let _ = writeln!(
                output,
                "{} Pod set count differs; workload must be re-evaluated.",
                "✗".red()
            );
        } else {
            let _ = writeln!(
                output,
                "{} {} pod set(s) changed quota footprint; workload must be re-evaluated.",
                "✗".red(),
                report.changed_count()
            );
        }

        output
    }

    /// Formats the fingerprints of a workload's pod sets.
    #[must_use]
    pub fn format_fingerprints(
        &self,
        workload: &Workload,
        hasher: &QuotaHasher,
        ignore_tolerations: bool,
    ) -> String {
        let rows: Vec<FingerprintRow> = workload
            .pod_sets()
            .iter()
            .map(|p| FingerprintRow {
                name: p.name.clone(),
                count: p.count,
                min_count: p.min_count.map_or_else(|| String::from("-"), |m| m.to_string()),
                containers: format!(
                    "{}+{}",
                    p.pod_spec().init_containers.len(),
                    p.pod_spec().containers.len()
                ),
                fingerprint: hasher.hash_pod_set(p, ignore_tolerations),
            })
            .collect();
        let workload_hash = hasher.hash_pod_sets(workload.pod_sets(), ignore_tolerations);

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "workload": workload.display_name(),
                    "ignoreTolerations": ignore_tolerations,
                    "fingerprint": workload_hash,
                    "podSets": rows,
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();
                let _ = writeln!(output, "\nWorkload: {}", workload.display_name());
                let _ = writeln!(output, "   Fingerprint: {}\n", hasher.short_hash(&workload_hash));

                let rows: Vec<FingerprintRow> = rows
                    .into_iter()
                    .map(|mut row| {
                        row.fingerprint = hasher.short_hash(&row.fingerprint);
                        row
                    })
                    .collect();
                if !rows.is_empty() {
                    output.push_str(&Table::new(rows).to_string());
                    output.push('\n');
                }
                output
            }
        }
    }

    /// Formats a validation result.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": result.is_valid(),
                    "errors": result.errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    "warnings": if show_warnings { result.warnings.clone() } else { Vec::new() },
                });
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => {
                let mut output = String::new();
                if result.is_valid() {
                    let _ = writeln!(output, "{} Workload is valid!", "✓".green());
                } else {
                    let _ = writeln!(
                        output,
                        "{} Workload has {} error(s):",
                        "✗".red(),
                        result.error_count()
                    );
                    for error in &result.errors {
                        let _ = writeln!(output, "   - {error}");
                    }
                }
                if show_warnings && !result.warnings.is_empty() {
                    let _ = writeln!(output, "\n{} Warnings:", "⚠".yellow());
                    for warning in &result.warnings {
                        let _ = writeln!(output, "   - {warning}");
                    }
                }
                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::PodSetBuilder;
    use crate::model::WorkloadSpec;

    #[test]
    fn test_format_comparison_json() {
        let old = vec![PodSetBuilder::new("main", 1).request("cpu", "1").obj()];
        let new = vec![PodSetBuilder::new("main", 1).request("cpu", "2").obj()];
        let report = ComparisonReport::build(&old, &new, false);

        let output = OutputFormatter::new(OutputFormat::Json).format_comparison(&report);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["equivalent"], serde_json::json!(false));
        assert_eq!(value["podSets"][0]["equivalent"], serde_json::json!(false));
    }

    #[test]
    fn test_format_comparison_text() {
        colored::control::set_override(false);
        let old = vec![PodSetBuilder::new("main", 1).obj()];
        let report = ComparisonReport::build(&old, &old, true);

        let output = OutputFormatter::new(OutputFormat::Text).format_comparison(&report);
        assert!(output.contains("quota-equivalent"));
        assert!(output.contains("Tolerations ignored."));
    }

    #[test]
    fn test_format_fingerprints_json() {
        let workload = Workload {
            spec: WorkloadSpec {
                pod_sets: vec![PodSetBuilder::new("main", 2).obj()],
                queue_name: None,
            },
            ..Workload::default()
        };
        let hasher = QuotaHasher::new();

        let output =
            OutputFormatter::new(OutputFormat::Json).format_fingerprints(&workload, &hasher, false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value["podSets"][0]["fingerprint"],
            serde_json::json!(hasher.hash_pod_set(&workload.pod_sets()[0], false))
        );
        assert_eq!(value["podSets"][0]["minCount"], serde_json::json!("-"));
    }

    #[test]
    fn test_format_validation_text() {
        colored::control::set_override(false);
        let result = ValidationResult {
            errors: vec![],
            warnings: vec![String::from("No pod sets defined in workload")],
        };

        let output = OutputFormatter::new(OutputFormat::Text).format_validation(&result, true);
        assert!(output.contains("Workload is valid!"));
        assert!(output.contains("No pod sets defined"));
    }
}
