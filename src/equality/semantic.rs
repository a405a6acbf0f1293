//! Value-level deep equality.
//!
//! [`SemanticEq`] compares nested records by value: quantities by their exact
//! amount, sequences position by position, and maps by key set and values
//! regardless of insertion order.

use std::collections::BTreeMap;

use crate::model::{
    Quantity, ResourceClaim, ResourceRequirements, TaintEffect, Toleration, TolerationOperator,
};

/// Equality by value rather than by representation.
pub trait SemanticEq {
    /// Returns true if `self` and `other` hold the same value.
    fn semantic_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_semantic_eq_by_partial_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SemanticEq for $ty {
                fn semantic_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_semantic_eq_by_partial_eq!(
    bool,
    i32,
    i64,
    u32,
    u64,
    str,
    String,
    TolerationOperator,
    TaintEffect,
);

impl SemanticEq for Quantity {
    fn semantic_eq(&self, other: &Self) -> bool {
        // Quantity equality is already defined on the exact value.
        self == other
    }
}

impl<T: SemanticEq> SemanticEq for Option<T> {
    fn semantic_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (None, None) => true,
            (Some(a), Some(b)) => a.semantic_eq(b),
            _ => false,
        }
    }
}

impl<T: SemanticEq> SemanticEq for [T] {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(x, y)| x.semantic_eq(y))
    }
}

impl<T: SemanticEq> SemanticEq for Vec<T> {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.as_slice().semantic_eq(other.as_slice())
    }
}

impl<K: Ord, V: SemanticEq> SemanticEq for BTreeMap<K, V> {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, a)| other.get(key).is_some_and(|b| a.semantic_eq(b)))
    }
}

impl SemanticEq for Toleration {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.key.semantic_eq(&other.key)
            && self.operator.semantic_eq(&other.operator)
            && self.value.semantic_eq(&other.value)
            && self.effect.semantic_eq(&other.effect)
            && self.toleration_seconds.semantic_eq(&other.toleration_seconds)
    }
}

impl SemanticEq for ResourceClaim {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.name.semantic_eq(&other.name) && self.request.semantic_eq(&other.request)
    }
}

/// Claims are compared in order, like the other sequences.
impl SemanticEq for ResourceRequirements {
    fn semantic_eq(&self, other: &Self) -> bool {
        self.requests.semantic_eq(&other.requests)
            && self.limits.semantic_eq(&other.limits)
            && self.claims.semantic_eq(&other.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::quantity;
    use crate::model::ResourceList;

    fn resources(pairs: &[(&str, &str)]) -> ResourceList {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), quantity(v)))
            .collect()
    }

    #[test]
    fn test_map_compares_values_not_spelling() {
        let a = resources(&[("cpu", "1"), ("memory", "1Gi")]);
        let b = resources(&[("memory", "1024Mi"), ("cpu", "1000m")]);
        assert!(a.semantic_eq(&b));
    }

    #[test]
    fn test_map_absent_key_differs_from_zero() {
        let a = resources(&[("cpu", "1")]);
        let b = resources(&[("cpu", "1"), ("memory", "0")]);
        assert!(!a.semantic_eq(&b));
        assert!(!b.semantic_eq(&a));
    }

    #[test]
    fn test_map_same_len_different_keys() {
        let a = resources(&[("cpu", "1")]);
        let b = resources(&[("memory", "1")]);
        assert!(!a.semantic_eq(&b));
    }

    #[test]
    fn test_sequence_is_order_sensitive() {
        let a = vec![String::from("x"), String::from("y")];
        let b = vec![String::from("y"), String::from("x")];
        assert!(a.semantic_eq(&a.clone()));
        assert!(!a.semantic_eq(&b));
        assert!(!a.semantic_eq(&vec![String::from("x")]));
    }

    #[test]
    fn test_option() {
        assert!(None::<i32>.semantic_eq(&None));
        assert!(Some(1_i32).semantic_eq(&Some(1)));
        assert!(!Some(1_i32).semantic_eq(&None));
        assert!(!Some(1_i32).semantic_eq(&Some(2)));
    }

    #[test]
    fn test_toleration_fields() {
        let base = Toleration {
            key: String::from("instance"),
            operator: Some(TolerationOperator::Equal),
            value: String::from("spot"),
            effect: Some(TaintEffect::NoSchedule),
            toleration_seconds: None,
        };
        assert!(base.semantic_eq(&base.clone()));

        let mut other = base.clone();
        other.toleration_seconds = Some(30);
        assert!(!base.semantic_eq(&other));

        let mut other = base.clone();
        other.operator = None;
        assert!(!base.semantic_eq(&other));
    }

    fn claim(name: &str, request: Option<&str>) -> ResourceClaim {
        ResourceClaim {
            name: name.to_string(),
            request: request.map(str::to_string),
        }
    }

    #[test]
    fn test_resource_requirements_compare_claims() {
        let a = ResourceRequirements {
            requests: resources(&[("cpu", "2")]),
            limits: resources(&[("cpu", "4")]),
            claims: vec![claim("gpu", None)],
        };
        assert!(a.semantic_eq(&a.clone()));

        let mut added = a.clone();
        added.claims.push(claim("nic", None));
        assert!(!a.semantic_eq(&added));
        assert!(!added.semantic_eq(&a));

        let mut removed = a.clone();
        removed.claims.clear();
        assert!(!a.semantic_eq(&removed));

        let mut narrowed = a.clone();
        narrowed.claims[0].request = Some(String::from("a100"));
        assert!(!a.semantic_eq(&narrowed));

        let mut relimited = a.clone();
        relimited.limits = resources(&[("cpu", "3")]);
        assert!(!a.semantic_eq(&relimited));
    }
}
