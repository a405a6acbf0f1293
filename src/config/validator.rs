//! Workload validation.
//!
//! The comparator accepts any well-typed input. This validator is an
//! advisory pass run by the CLI to catch workloads an admission system would
//! reject anyway, such as negative counts or requests above limits.

use crate::error::{ConfigError, PodSetQuotaError, Result};
use crate::model::{Container, PodSet, Toleration, TolerationOperator, Workload};
use std::collections::HashSet;
use tracing::debug;

/// Validator for workload documents.
#[derive(Debug, Default)]
pub struct WorkloadValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl WorkloadValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a workload and returns every finding.
    #[must_use]
    pub fn check(&self, workload: &Workload) -> ValidationResult {
        let mut result = ValidationResult::default();

        if workload.pod_sets().is_empty() {
            result
                .warnings
                .push(String::from("No pod sets defined in workload"));
        }

        let mut seen_names = HashSet::new();
        for (i, pod_set) in workload.pod_sets().iter().enumerate() {
            let prefix = format!("spec.podSets[{i}]");

            if pod_set.name.is_empty() {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.name"),
                    message: String::from("Pod set name cannot be empty"),
                });
            } else if !seen_names.insert(pod_set.name.as_str()) {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.name"),
                    message: format!("Duplicate pod set name: {}", pod_set.name),
                });
            }

            Self::validate_counts(pod_set, &prefix, &mut result);
            Self::validate_tolerations(&pod_set.pod_spec().tolerations, &prefix, &mut result);

            let spec = pod_set.pod_spec();
            if spec.containers.is_empty() {
                result
                    .warnings
                    .push(format!("{prefix}: pod set '{}' has no containers", pod_set.name));
            }
            Self::validate_containers(
                &spec.init_containers,
                &format!("{prefix}.template.spec.initContainers"),
                &mut result,
            );
            Self::validate_containers(
                &spec.containers,
                &format!("{prefix}.template.spec.containers"),
                &mut result,
            );
        }

        result
    }

    /// Validates a workload.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first finding if validation fails.
    pub fn validate(&self, workload: &Workload) -> Result<ValidationResult> {
        let result = self.check(workload);

        match result.errors.first() {
            None => {
                debug!("Workload validation passed");
                Ok(result)
            }
            Some(first_error) => Err(PodSetQuotaError::Config(ConfigError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            ))),
        }
    }

    /// Validates count and minimum count.
    fn validate_counts(pod_set: &PodSet, prefix: &str, result: &mut ValidationResult) {
        if pod_set.count < 0 {
            result.errors.push(ValidationError {
                field: format!("{prefix}.count"),
                message: format!("Count must not be negative, got {}", pod_set.count),
            });
        } else if pod_set.count == 0 {
            result
                .warnings
                .push(format!("{prefix}.count: pod set '{}' requests no pods", pod_set.name));
        }

        if let Some(min_count) = pod_set.min_count {
            if min_count < 0 {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.minCount"),
                    message: format!("Minimum count must not be negative, got {min_count}"),
                });
            } else if min_count > pod_set.count {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.minCount"),
                    message: format!(
                        "Minimum count {min_count} exceeds count {}",
                        pod_set.count
                    ),
                });
            }
        }
    }

    /// Validates toleration operator/value combinations.
    fn validate_tolerations(
        tolerations: &[Toleration],
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        for (i, toleration) in tolerations.iter().enumerate() {
            if toleration.operator == Some(TolerationOperator::Exists)
                && !toleration.value.is_empty()
            {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.template.spec.tolerations[{i}].value"),
                    message: String::from("Value must be empty when operator is 'Exists'"),
                });
            }
        }
    }

    /// Validates container resource amounts.
    fn validate_containers(containers: &[Container], prefix: &str, result: &mut ValidationResult) {
        for (i, container) in containers.iter().enumerate() {
            let resources = &container.resources;
            let field = format!("{prefix}[{i}].resources");

            for (name, amount) in resources.requests.iter().chain(&resources.limits) {
                if amount.is_negative() {
                    result.errors.push(ValidationError {
                        field: format!("{field}.{name}"),
                        message: format!("Resource {name} must not be negative, got {amount}"),
                    });
                }
            }

            for (name, request) in &resources.requests {
                if let Some(limit) = resources.limits.get(name) {
                    if request > limit {
                        result.errors.push(ValidationError {
                            field: format!("{field}.requests.{name}"),
                            message: format!(
                                "Request {request} for {name} exceeds limit {limit}"
                            ),
                        });
                    }
                }
            }
        }
    }
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkloadSpec;
    use crate::model::testing::PodSetBuilder;

    fn workload(pod_sets: Vec<PodSet>) -> Workload {
        Workload {
            spec: WorkloadSpec {
                pod_sets,
                queue_name: None,
            },
            ..Workload::default()
        }
    }

    #[test]
    fn test_valid_workload() {
        let wl = workload(vec![
            PodSetBuilder::new("main", 4)
                .set_minimum_count(2)
                .request("cpu", "1")
                .limit("cpu", "2")
                .obj(),
        ]);
        let result = WorkloadValidator::new().validate(&wl).unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_min_count_above_count() {
        let wl = workload(vec![PodSetBuilder::new("main", 2).set_minimum_count(3).obj()]);
        let result = WorkloadValidator::new().check(&wl);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.errors[0].field, "spec.podSets[0].minCount");
    }

    #[test]
    fn test_negative_count_and_duplicate_names() {
        let wl = workload(vec![
            PodSetBuilder::new("main", -1).obj(),
            PodSetBuilder::new("main", 1).obj(),
        ]);
        let result = WorkloadValidator::new().check(&wl);
        assert_eq!(result.error_count(), 2);
        assert!(WorkloadValidator::new().validate(&wl).is_err());
    }

    #[test]
    fn test_request_above_limit() {
        let wl = workload(vec![
            PodSetBuilder::new("main", 1)
                .request("memory", "2Gi")
                .limit("memory", "1Gi")
                .obj(),
        ]);
        let result = WorkloadValidator::new().check(&wl);
        assert_eq!(result.error_count(), 1);
        assert_eq!(
            result.errors[0].field,
            "spec.podSets[0].template.spec.containers[0].resources.requests.memory"
        );
    }

    #[test]
    fn test_negative_quantity() {
        let wl = workload(vec![PodSetBuilder::new("main", 1).request("cpu", "-1").obj()]);
        let result = WorkloadValidator::new().check(&wl);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_exists_toleration_with_value() {
        let toleration = Toleration {
            key: String::from("instance"),
            operator: Some(TolerationOperator::Exists),
            value: String::from("spot"),
            ..Toleration::default()
        };
        let wl = workload(vec![PodSetBuilder::new("main", 1).toleration(toleration).obj()]);
        let result = WorkloadValidator::new().check(&wl);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn test_warnings() {
        let empty = WorkloadValidator::new().check(&workload(vec![]));
        assert!(empty.is_valid());
        assert_eq!(empty.warning_count(), 1);

        let no_containers = PodSetBuilder::new("main", 0).containers(vec![]).obj();
        let result = WorkloadValidator::new().check(&workload(vec![no_containers]));
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 2);
    }
}
