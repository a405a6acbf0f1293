//! Test builders for pod sets.

use std::collections::BTreeMap;

use super::{
    Container, PodSet, Quantity, ResourceClaim, TaintEffect, Toleration, TolerationOperator,
};

/// Fluent builder producing a pod set with a single main container `c`.
pub struct PodSetBuilder {
    pod_set: PodSet,
}

impl PodSetBuilder {
    pub fn new(name: &str, count: i32) -> Self {
        let mut pod_set = PodSet::new(name, count);
        pod_set.template.spec.restart_policy = Some(String::from("Never"));
        pod_set.template.spec.containers.push(Container {
            name: String::from("c"),
            ..Container::default()
        });
        Self { pod_set }
    }

    pub fn set_minimum_count(mut self, min_count: i32) -> Self {
        self.pod_set.min_count = Some(min_count);
        self
    }

    pub fn request(mut self, resource: &str, amount: &str) -> Self {
        self.main_container()
            .resources
            .requests
            .insert(resource.to_string(), quantity(amount));
        self
    }

    pub fn limit(mut self, resource: &str, amount: &str) -> Self {
        self.main_container()
            .resources
            .limits
            .insert(resource.to_string(), quantity(amount));
        self
    }

    pub fn claim(mut self, name: &str) -> Self {
        self.main_container().resources.claims.push(ResourceClaim {
            name: name.to_string(),
            request: None,
        });
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.main_container().image = image.to_string();
        self
    }

    pub fn containers(mut self, containers: Vec<Container>) -> Self {
        self.pod_set.template.spec.containers = containers;
        self
    }

    pub fn init_containers(mut self, containers: Vec<Container>) -> Self {
        self.pod_set.template.spec.init_containers.extend(containers);
        self
    }

    pub fn toleration(mut self, toleration: Toleration) -> Self {
        self.pod_set.template.spec.tolerations.push(toleration);
        self
    }

    pub fn node_selector(mut self, selector: &[(&str, &str)]) -> Self {
        self.pod_set.template.spec.node_selector = selector
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<BTreeMap<_, _>>();
        self
    }

    pub fn obj(self) -> PodSet {
        self.pod_set
    }

    fn main_container(&mut self) -> &mut Container {
        &mut self.pod_set.template.spec.containers[0]
    }
}

pub fn quantity(amount: &str) -> Quantity {
    amount.parse().unwrap()
}

/// Container with the given image and a single request.
pub fn container_with_request(image: &str, resource: &str, amount: &str) -> Container {
    let mut container = Container {
        name: String::from("c"),
        image: image.to_string(),
        ..Container::default()
    };
    container
        .resources
        .requests
        .insert(resource.to_string(), quantity(amount));
    container
}

/// `instance=<value>:NoSchedule` toleration.
pub fn instance_toleration(value: &str) -> Toleration {
    Toleration {
        key: String::from("instance"),
        operator: Some(TolerationOperator::Equal),
        value: value.to_string(),
        effect: Some(TaintEffect::NoSchedule),
        toleration_seconds: None,
    }
}
