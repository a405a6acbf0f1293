//! Quota equivalence of workload pod sets.
//!
//! This module decides whether an update to a workload changes its resource
//! footprint in a way that matters for admission:
//! - Pure comparison predicates over pod sets
//! - The value-level equality primitive they are built on
//! - Fingerprints and reports derived from the same rules

mod hash;
mod podset;
mod report;
mod semantic;

pub use hash::QuotaHasher;
pub use podset::{compare_pod_set_slices, compare_pod_sets};
pub use report::{ComparisonReport, PodSetVerdict};
pub use semantic::SemanticEq;
