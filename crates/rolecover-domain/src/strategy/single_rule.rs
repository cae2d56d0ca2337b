use super::{diagnose, CoverageStrategy};
use crate::model::{PermissionGrant, ResourceMatching, RuleCollection};
use crate::report::Uncovered;

/// A user grant is covered when at least one reference grant dominates it on every axis.
/// Resources compare literally.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleRule;

impl CoverageStrategy for SingleRule {
    fn name(&self) -> &'static str {
        "single-rule"
    }

    fn check(&self, user: &PermissionGrant, reference: &RuleCollection) -> Result<(), Uncovered> {
        diagnose(user, reference.grants(), ResourceMatching::Exact)
    }
}
