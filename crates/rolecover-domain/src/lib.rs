//! Pure coverage evaluation (no IO).
//!
//! Input: two rule collections, already deserialized elsewhere.
//! Output: a verdict saying whether the user rules are covered, and why not.

#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod policy;
pub mod report;
pub mod strategy;

mod engine;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use engine::{check_coverage, evaluate, evaluate_grants};
pub use error::{RuleError, StructuralError};
pub use model::{
    Axis, AxisSet, NameScope, PermissionGrant, ResourceMatching, RuleCollection, Side,
};
pub use policy::{EffectiveConfig, StrategyKind};
pub use report::{AxisFailure, DomainReport, Missing, Uncovered, Verdict, Violation};
