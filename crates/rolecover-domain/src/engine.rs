use crate::error::StructuralError;
use crate::model::{RuleCollection, Side};
use crate::policy::{EffectiveConfig, StrategyKind};
use crate::report::{DomainReport, Uncovered, Verdict, Violation};
use rolecover_types::PolicyRule;

/// Validate both collections, then evaluate coverage.
///
/// Structural errors abort before any coverage work; user rules are validated first.
pub fn evaluate(
    user: &[PolicyRule],
    reference: &[PolicyRule],
    cfg: &EffectiveConfig,
) -> Result<DomainReport, StructuralError> {
    let user = RuleCollection::from_rules(Side::User, user)?;
    let reference = RuleCollection::from_rules(Side::Reference, reference)?;
    Ok(evaluate_grants(&user, &reference, cfg))
}

/// Evaluate with default limits and return just the verdict.
pub fn check_coverage(
    user: &[PolicyRule],
    reference: &[PolicyRule],
    strategy: StrategyKind,
) -> Result<Verdict, StructuralError> {
    let cfg = EffectiveConfig {
        strategy,
        ..EffectiveConfig::default()
    };
    evaluate(user, reference, &cfg).map(|report| report.verdict)
}

/// Coverage over already-validated collections. Pure and deterministic.
pub fn evaluate_grants(
    user: &RuleCollection,
    reference: &RuleCollection,
    cfg: &EffectiveConfig,
) -> DomainReport {
    let strategy = cfg.strategy.strategy();

    let mut violations: Vec<Violation> = Vec::new();
    for (rule_index, grant) in user.grants().iter().enumerate() {
        // Checked here rather than per strategy: a grant with an empty axis decomposes
        // into no requests, but an empty reference still covers nothing.
        let outcome = if reference.is_empty() {
            Err(Uncovered::no_reference_rules())
        } else {
            strategy.check(grant, reference)
        };
        if let Err(uncovered) = outcome {
            violations.push(Violation {
                rule_index,
                rule: grant.clone(),
                uncovered,
            });
        }
    }

    let total = violations.len();
    let covers = violations.is_empty();

    let mut truncated_reason = None;
    if violations.len() > cfg.max_findings {
        violations.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "violations truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    DomainReport {
        verdict: Verdict { covers, violations },
        strategy: strategy.name(),
        user_rules: user.len(),
        reference_rules: reference.len(),
        violations_total: total,
        truncated_reason,
    }
}
