//! Quota fingerprints for pod sets.
//!
//! A fingerprint hashes exactly the fields the comparator looks at, in a
//! canonical form, so quota-equivalent pod sets always share a fingerprint.
//! Callers can use it to memoize requeue decisions across many workloads.

use sha2::{Digest, Sha256};

use crate::model::{Container, PodSet, ResourceClaim, ResourceList, Toleration};

/// Hasher for computing quota fingerprints.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuotaHasher;

impl QuotaHasher {
    /// Creates a new quota hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the fingerprint of an ordered list of pod sets.
    #[must_use]
    pub fn hash_pod_sets(&self, pod_sets: &[PodSet], ignore_tolerations: bool) -> String {
        let mut hasher = Sha256::new();

        hasher.update((pod_sets.len() as u64).to_be_bytes());
        for pod_set in pod_sets {
            hasher.update(self.hash_pod_set(pod_set, ignore_tolerations).as_bytes());
        }

        hex::encode(hasher.finalize())
    }

    /// Computes the fingerprint of a single pod set.
    ///
    /// The pod set name is not part of the fingerprint.
    #[must_use]
    pub fn hash_pod_set(&self, pod_set: &PodSet, ignore_tolerations: bool) -> String {
        let mut hasher = Sha256::new();

        // Counts
        hasher.update(pod_set.count.to_be_bytes());
        match pod_set.min_count {
            Some(min_count) => {
                hasher.update([1u8]);
                hasher.update(min_count.to_be_bytes());
            }
            None => hasher.update([0u8]),
        }

        // Tolerations keep their order
        let spec = pod_set.pod_spec();
        if ignore_tolerations {
            hasher.update([0u8]);
        } else {
            hasher.update([1u8]);
            hasher.update((spec.tolerations.len() as u64).to_be_bytes());
            for toleration in &spec.tolerations {
                hash_toleration(&mut hasher, toleration);
            }
        }

        // Containers
        hash_containers(&mut hasher, &spec.init_containers);
        hash_containers(&mut hasher, &spec.containers);

        hex::encode(hasher.finalize())
    }

    /// Computes a short hash (first 8 characters) for display purposes.
    #[must_use]
    pub fn short_hash(&self, hash: &str) -> String {
        hash.chars().take(8).collect()
    }

    /// Compares two hashes to determine if they are equal.
    #[must_use]
    pub fn hashes_match(hash1: &str, hash2: &str) -> bool {
        // Constant-time comparison
        if hash1.len() != hash2.len() {
            return false;
        }

        hash1
            .bytes()
            .zip(hash2.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// Writes a length-prefixed string so adjacent fields cannot run together.
fn update_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

fn hash_toleration(hasher: &mut Sha256, toleration: &Toleration) {
    update_str(hasher, &toleration.key);
    update_str(
        hasher,
        &toleration.operator.map(|op| op.to_string()).unwrap_or_default(),
    );
    update_str(hasher, &toleration.value);
    update_str(
        hasher,
        &toleration.effect.map(|e| e.to_string()).unwrap_or_default(),
    );
    match toleration.toleration_seconds {
        Some(seconds) => {
            hasher.update([1u8]);
            hasher.update(seconds.to_be_bytes());
        }
        None => hasher.update([0u8]),
    }
}

fn hash_containers(hasher: &mut Sha256, containers: &[Container]) {
    hasher.update((containers.len() as u64).to_be_bytes());
    for container in containers {
        hash_resource_list(hasher, &container.resources.requests);
        hash_resource_list(hasher, &container.resources.limits);
        hash_claims(hasher, &container.resources.claims);
    }
}

fn hash_claims(hasher: &mut Sha256, claims: &[ResourceClaim]) {
    hasher.update((claims.len() as u64).to_be_bytes());
    for claim in claims {
        update_str(hasher, &claim.name);
        match &claim.request {
            Some(request) => {
                hasher.update([1u8]);
                update_str(hasher, request);
            }
            None => hasher.update([0u8]),
        }
    }
}

/// `ResourceList` is a `BTreeMap`, so iteration is already in key order.
fn hash_resource_list(hasher: &mut Sha256, resources: &ResourceList) {
    hasher.update((resources.len() as u64).to_be_bytes());
    for (name, amount) in resources {
        update_str(hasher, name);
        update_str(hasher, &amount.canonical());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::compare_pod_sets;
    use crate::model::testing::{PodSetBuilder, instance_toleration};

    #[test]
    fn test_pod_set_hash_deterministic() {
        let hasher = QuotaHasher::new();
        let pod_set = PodSetBuilder::new("ps", 2).request("cpu", "1").obj();

        assert_eq!(
            hasher.hash_pod_set(&pod_set, false),
            hasher.hash_pod_set(&pod_set, false)
        );
    }

    #[test]
    fn test_equivalent_pod_sets_share_hash() {
        let hasher = QuotaHasher::new();
        let a = PodSetBuilder::new("ps", 2)
            .image("img1")
            .request("cpu", "1")
            .request("memory", "1Gi")
            .obj();
        let b = PodSetBuilder::new("other-name", 2)
            .image("img2")
            .request("memory", "1024Mi")
            .request("cpu", "1000m")
            .node_selector(&[("pool", "spot")])
            .obj();

        assert!(compare_pod_sets(&a, &b, false));
        assert_eq!(hasher.hash_pod_set(&a, false), hasher.hash_pod_set(&b, false));
    }

    #[test]
    fn test_quota_change_changes_hash() {
        let hasher = QuotaHasher::new();
        let a = PodSetBuilder::new("ps", 2).request("cpu", "1").obj();
        let b = PodSetBuilder::new("ps", 2).request("cpu", "2").obj();
        let c = PodSetBuilder::new("ps", 2).request("cpu", "1").set_minimum_count(1).obj();

        assert_ne!(hasher.hash_pod_set(&a, false), hasher.hash_pod_set(&b, false));
        assert_ne!(hasher.hash_pod_set(&a, false), hasher.hash_pod_set(&c, false));
    }

    #[test]
    fn test_resource_claims_change_hash() {
        let hasher = QuotaHasher::new();
        let a = PodSetBuilder::new("ps", 1).request("cpu", "1").obj();
        let b = PodSetBuilder::new("ps", 1).request("cpu", "1").claim("gpu").obj();

        assert!(!compare_pod_sets(&a, &b, false));
        assert_ne!(hasher.hash_pod_set(&a, false), hasher.hash_pod_set(&b, false));
    }

    #[test]
    fn test_ignored_tolerations_do_not_affect_hash() {
        let hasher = QuotaHasher::new();
        let a = PodSetBuilder::new("ps", 1).toleration(instance_toleration("spot")).obj();
        let b = PodSetBuilder::new("ps", 1).toleration(instance_toleration("demand")).obj();

        assert_eq!(hasher.hash_pod_set(&a, true), hasher.hash_pod_set(&b, true));
        assert_ne!(hasher.hash_pod_set(&a, false), hasher.hash_pod_set(&b, false));
    }

    #[test]
    fn test_slice_hash_is_length_and_order_sensitive() {
        let hasher = QuotaHasher::new();
        let a = PodSetBuilder::new("a", 1).obj();
        let b = PodSetBuilder::new("b", 2).obj();

        let forward = hasher.hash_pod_sets(&[a.clone(), b.clone()], false);
        let backward = hasher.hash_pod_sets(&[b, a.clone()], false);
        let single = hasher.hash_pod_sets(&[a], false);

        assert_ne!(forward, backward);
        assert_ne!(forward, single);
    }

    #[test]
    fn test_short_hash() {
        let hasher = QuotaHasher::new();
        let short = hasher.short_hash("abcdef1234567890abcdef1234567890");

        assert_eq!(short, "abcdef12");
    }

    #[test]
    fn test_hashes_match() {
        assert!(QuotaHasher::hashes_match("abc123", "abc123"));
        assert!(!QuotaHasher::hashes_match("abc123", "abc124"));
        assert!(!QuotaHasher::hashes_match("abc123", "abc12"));
    }
}
