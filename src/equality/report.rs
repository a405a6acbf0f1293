//! Comparison report for two pod set lists.
//!
//! The report carries the overall verdict plus one boolean per aligned
//! index. It never describes which field changed.

use serde::Serialize;

use super::podset::{compare_pod_set_slices, compare_pod_sets};
use crate::model::PodSet;

/// Verdict for one pair of pod sets at the same index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PodSetVerdict {
    /// Position in both lists.
    pub index: usize,
    /// Name on the old side, if the old list has this index.
    pub old_name: Option<String>,
    /// Name on the new side, if the new list has this index.
    pub new_name: Option<String>,
    /// Equivalence of the pair; `None` when only one side has this index.
    pub equivalent: Option<bool>,
}

/// Result of comparing two pod set lists.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Whether tolerations were excluded from the comparison.
    pub ignore_tolerations: bool,
    /// Overall verdict.
    pub equivalent: bool,
    /// Per-index verdicts, covering the longer of the two lists.
    pub pod_sets: Vec<PodSetVerdict>,
}

impl ComparisonReport {
    /// Compares `old` against `new` and records the verdicts.
    #[must_use]
    pub fn build(old: &[PodSet], new: &[PodSet], ignore_tolerations: bool) -> Self {
        let len = old.len().max(new.len());
        let pod_sets = (0..len)
            .map(|index| {
                let a = old.get(index);
                let b = new.get(index);
                PodSetVerdict {
                    index,
                    old_name: a.map(|p| p.name.clone()),
                    new_name: b.map(|p| p.name.clone()),
                    equivalent: a
                        .zip(b)
                        .map(|(x, y)| compare_pod_sets(x, y, ignore_tolerations)),
                }
            })
            .collect();

        Self {
            ignore_tolerations,
            equivalent: compare_pod_set_slices(old, new, ignore_tolerations),
            pod_sets,
        }
    }

    /// Returns true if the lists differ in length.
    #[must_use]
    pub fn length_mismatch(&self) -> bool {
        self.pod_sets.iter().any(|v| v.equivalent.is_none())
    }

    /// Returns the number of aligned pairs that are not equivalent.
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.pod_sets
            .iter()
            .filter(|v| v.equivalent == Some(false))
            .count()
    }
}
