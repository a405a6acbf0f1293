//! Quota equivalence of pod sets.
//!
//! Two pod sets are quota-equivalent when an admission system would account
//! for them identically: same counts, same tolerations (unless ignored), and
//! the same requests, limits and resource claims on every init and main
//! container, matched by position. Everything else in the template (names,
//! images, env, probes, node selectors, ...) is ignored, so mutations such as
//! injected sidecar images do not trigger re-admission.

use super::semantic::SemanticEq;
use crate::model::{Container, PodSet, PodSpec};

/// Returns true if both lists have the same length and every pair of pod
/// sets at the same index is quota-equivalent.
///
/// Pod set names are not compared; positional alignment is trusted.
#[must_use]
pub fn compare_pod_set_slices(a: &[PodSet], b: &[PodSet], ignore_tolerations: bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b)
        .all(|(x, y)| compare_pod_sets(x, y, ignore_tolerations))
}

/// Returns true if two pod sets are quota-equivalent.
///
/// An absent `min_count` only matches another absent `min_count`.
#[must_use]
pub fn compare_pod_sets(a: &PodSet, b: &PodSet, ignore_tolerations: bool) -> bool {
    if a.count != b.count {
        return false;
    }
    if !a.min_count.semantic_eq(&b.min_count) {
        return false;
    }
    compare_pod_template(&a.template.spec, &b.template.spec, ignore_tolerations)
}

/// Checks tolerations (unless ignored), then init containers, then main containers.
fn compare_pod_template(a: &PodSpec, b: &PodSpec, ignore_tolerations: bool) -> bool {
    if !ignore_tolerations && !a.tolerations.semantic_eq(&b.tolerations) {
        return false;
    }
    if !compare_container_resources(&a.init_containers, &b.init_containers) {
        return false;
    }
    compare_container_resources(&a.containers, &b.containers)
}

/// Same length, and equal requests, limits and claims at every index.
fn compare_container_resources(a: &[Container], b: &[Container]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b)
        .all(|(x, y)| x.resources.semantic_eq(&y.resources))
}
