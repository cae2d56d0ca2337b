use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "rolecover.config.v1";

/// `rolecover.toml` schema v1.
///
/// Every key is optional; unknown keys are tolerated for forward-compat.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RolecoverConfigV1 {
    /// Optional schema string for tooling (`rolecover.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `kubernetes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// `single-rule` or `decomposed`; beats the profile's choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// How many violations to report before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    #[serde(default)]
    pub documents: DocumentsConfig,
}

/// Which role documents the loader accepts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentsConfig {
    /// Accepted `kind` values. Defaults to `Role` and `ClusterRole`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<String>>,

    /// File-name globs used when a directory is passed. Defaults to `*.yaml`, `*.yml`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}
