// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Pod Set Quota
//!
//! Quota-equivalence checks for the pod sets of queued and admitted workloads.
//!
//! ## Overview
//!
//! A job-queueing controller has to decide whether an update to a workload
//! needs re-evaluation. This crate answers that with a single boolean:
//!
//! - Resource requests, limits and claims, container counts, pod counts and
//!   tolerations matter
//! - Images, environment, probes, names and node selectors do not
//!
//! Harmless mutations such as webhook-injected images therefore never cause
//! requeue churn, while any real change in capacity always does.
//!
//! ## Modules
//!
//! - [`equality`]: Comparator, deep-equality primitive, fingerprints, reports
//! - [`model`]: Workload, pod set and resource quantity types
//! - [`config`]: Workload loading, comparison options, validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```
//! use podset_quota::equality::compare_pod_set_slices;
//! use podset_quota::model::PodSet;
//!
//! let before = vec![PodSet::new("main", 10)];
//! let mut after = before.clone();
//! after[0].name = String::from("renamed");
//!
//! assert!(compare_pod_set_slices(&before, &after, false));
//!
//! after[0].count = 20;
//! assert!(!compare_pod_set_slices(&before, &after, false));
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod equality;
pub mod error;
pub mod model;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ComparisonOptions, WorkloadParser, WorkloadValidator};
pub use equality::{ComparisonReport, QuotaHasher, compare_pod_set_slices, compare_pod_sets};
pub use error::{PodSetQuotaError, Result};
pub use model::{PodSet, Quantity, Workload};
