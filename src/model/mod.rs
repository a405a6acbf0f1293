//! Object model for workloads and their pod sets.
//!
//! This module defines the pod set, pod spec and container types the
//! comparator reads, plus the exact-value [`Quantity`] used for resources.

mod quantity;
mod spec;

#[cfg(test)]
pub(crate) mod testing;

pub use quantity::Quantity;
pub use spec::{
    Container, ContainerPort, EnvVar, ExecAction, HttpGetAction, ObjectMeta, PodSet, PodSpec,
    PodTemplateSpec, Probe, ResourceClaim, ResourceList, ResourceRequirements, TaintEffect,
    Toleration, TolerationOperator, Workload, WorkloadSpec,
};
