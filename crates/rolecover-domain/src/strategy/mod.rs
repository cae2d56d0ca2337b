//! Coverage strategies: how one user grant is matched against the reference collection.

use crate::model::{PermissionGrant, ResourceMatching, RuleCollection};
use crate::report::Uncovered;

mod decomposed;
mod single_rule;

pub use decomposed::Decomposed;
pub use single_rule::SingleRule;

pub trait CoverageStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(())` when `reference` covers `user`.
    fn check(&self, user: &PermissionGrant, reference: &RuleCollection) -> Result<(), Uncovered>;
}

/// Find a reference grant dominating `user`, or describe the closest miss.
///
/// The closest reference grant has the fewest failing axes, then the fewest missing
/// values; ties go to the lowest index.
pub fn diagnose(
    user: &PermissionGrant,
    reference: &[PermissionGrant],
    matching: ResourceMatching,
) -> Result<(), Uncovered> {
    let mut best: Option<(usize, Vec<crate::report::AxisFailure>)> = None;

    for (index, candidate) in reference.iter().enumerate() {
        let failures = user.failures_against_matching(candidate, matching);
        if failures.is_empty() {
            return Ok(());
        }
        let closer = match &best {
            None => true,
            Some((_, current)) => Uncovered::distance(&failures) < Uncovered::distance(current),
        };
        if closer {
            best = Some((index, failures));
        }
    }

    Err(match best {
        Some((index, failures)) => Uncovered {
            closest: Some(index),
            failures,
            atom: None,
        },
        None => Uncovered::no_reference_rules(),
    })
}
