//! Stable DTOs and IDs used across the rolecover workspace.
//!
//! This crate is intentionally boring:
//! - the policy rule shape shared by the request and role documents
//! - the validation request/response contract
//! - data types for the emitted coverage report
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod rule;
pub mod wire;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{
    CoverageData, CoverageReport, DocumentOutcome, Finding, Location, Severity, ToolMeta, Verdict,
    SCHEMA_REPORT_V1,
};
pub use rule::{PolicyRule, WILDCARD};
pub use wire::{
    ErrorKind, ValidationRequest, ValidationResponse, ViolationDetail, SCHEMA_REQUEST_V1,
    SCHEMA_RESPONSE_V1,
};
