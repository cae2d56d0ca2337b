//! The request/response contract of the `validate` process boundary.
//!
//! The response keeps the `{ "covers": bool, "error": "..." }` shape existing integrations
//! read; everything else is optional and omitted when absent.

use crate::PolicyRule;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_REQUEST_V1: &str = "rolecover.request.v1";
pub const SCHEMA_RESPONSE_V1: &str = "rolecover.response.v1";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationRequest {
    #[serde(rename = "userRules")]
    pub user_rules: Vec<PolicyRule>,
    #[serde(rename = "referenceRules")]
    pub reference_rules: Vec<PolicyRule>,
}

/// Why a request could not be evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The payload could not be read or parsed at all.
    Input,
    /// The payload parsed but is not a well-formed pair of rule collections.
    Structural,
}

/// Machine-readable form of the first coverage violation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ViolationDetail {
    /// Zero-based index into `userRules`.
    #[serde(rename = "ruleIndex")]
    pub rule_index: usize,
    /// `apiGroups`, `resources`, `verbs`, `resourceNames`, or `referenceRules`.
    pub axis: String,
    /// Values no single reference rule granted; `["*"]` for an unbounded request.
    pub missing: Vec<String>,
    #[serde(
        rename = "closestReference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub closest_reference: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResponse {
    pub covers: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(rename = "errorKind", default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<ViolationDetail>,
}

impl ValidationResponse {
    pub fn covered() -> Self {
        Self {
            covers: true,
            ..Self::default()
        }
    }

    pub fn not_covered(explanation: String, violation: ViolationDetail) -> Self {
        Self {
            covers: false,
            explanation: Some(explanation),
            violation: Some(violation),
            ..Self::default()
        }
    }

    pub fn failed(kind: ErrorKind, error: String) -> Self {
        Self {
            covers: false,
            error: Some(error),
            error_kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }
}
