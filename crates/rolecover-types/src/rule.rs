use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The wildcard entry accepted on the `apiGroups`, `resources` and `verbs` axes.
pub const WILDCARD: &str = "*";

/// One access-control rule as it appears on the wire and in role documents.
///
/// Every axis is optional at this level so that an *absent* axis can be told apart
/// from an *empty* one. The engine decides which absences are structural errors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolicyRule {
    /// API groups; `""` is the core group, `"*"` is every group.
    #[serde(rename = "apiGroups", default, skip_serializing_if = "Option::is_none")]
    pub api_groups: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbs: Option<Vec<String>>,

    /// Restricts the rule to named instances. Absent or empty means every instance.
    #[serde(
        rename = "resourceNames",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource_names: Option<Vec<String>>,

    /// Accepted so documents carrying it can be reported precisely; never evaluated.
    #[serde(
        rename = "nonResourceURLs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub non_resource_urls: Option<Vec<String>>,
}

impl PolicyRule {
    pub fn new(api_groups: &[&str], resources: &[&str], verbs: &[&str]) -> Self {
        Self {
            api_groups: Some(to_owned(api_groups)),
            resources: Some(to_owned(resources)),
            verbs: Some(to_owned(verbs)),
            resource_names: None,
            non_resource_urls: None,
        }
    }

    pub fn with_resource_names(mut self, names: &[&str]) -> Self {
        self.resource_names = Some(to_owned(names));
        self
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
