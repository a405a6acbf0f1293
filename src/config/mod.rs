//! Configuration module for the pod set quota tooling.
//!
//! This module handles everything around a comparison:
//! - Loading workload documents from YAML or JSON
//! - Comparison options from flags and environment
//! - Advisory validation of workloads

mod options;
mod parser;
mod validator;

pub use options::{ComparisonOptions, IGNORE_TOLERATIONS_ENV};
pub use parser::WorkloadParser;
pub use validator::{ValidationError, ValidationResult, WorkloadValidator};
