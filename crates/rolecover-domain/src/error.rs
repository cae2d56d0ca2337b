//! Structural errors: the input is not a well-formed rule collection.
//!
//! These are distinct from a coverage violation, which is a normal `covers = false` outcome.

use crate::model::{Axis, Side};
use thiserror::Error;

/// What is wrong with a single rule.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("missing required field `{0}`")]
    MissingAxis(Axis),

    #[error("nonResourceURLs are not supported by coverage checks")]
    UnsupportedNonResourceUrls,

    /// The rule could not be decoded at all (wrong value types, unknown keys).
    #[error("{0}")]
    Malformed(String),
}

/// A rule error pinned to the collection and position it came from.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{side}[{index}]: {cause}")]
pub struct StructuralError {
    pub side: Side,
    pub index: usize,
    pub cause: RuleError,
}

impl StructuralError {
    pub fn new(side: Side, index: usize, cause: RuleError) -> Self {
        Self { side, index, cause }
    }
}
