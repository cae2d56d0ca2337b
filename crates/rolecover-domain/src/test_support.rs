use crate::model::{NameScope, PermissionGrant, RuleCollection};
use rolecover_types::PolicyRule;

pub fn rule(api_groups: &[&str], resources: &[&str], verbs: &[&str]) -> PolicyRule {
    PolicyRule::new(api_groups, resources, verbs)
}

pub fn grant(api_groups: &[&str], resources: &[&str], verbs: &[&str]) -> PermissionGrant {
    PermissionGrant::from_rule(&rule(api_groups, resources, verbs))
        .expect("test rules are well-formed")
}

pub fn collection(grants: Vec<PermissionGrant>) -> RuleCollection {
    RuleCollection::from(grants)
}

/// `apps` deployments/replicasets with read and create verbs.
pub fn deployments_reference() -> Vec<PolicyRule> {
    vec![rule(
        &["apps"],
        &["deployments", "replicasets"],
        &["get", "list", "watch", "create"],
    )]
}

impl PermissionGrant {
    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.resource_names = NameScope::from_values(names);
        self
    }
}
