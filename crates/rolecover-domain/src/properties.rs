//! Property-based tests for the coverage engine.
//!
//! Invariants exercised:
//! - evaluation is deterministic
//! - every rule covers itself, under both strategies
//! - reference order and duplicates never change the verdict
//! - decomposed coverage is never stricter than single-rule coverage

use crate::engine::{check_coverage, evaluate};
use crate::model::Axis;
use crate::policy::{EffectiveConfig, StrategyKind};
use proptest::prelude::*;
use rolecover_types::PolicyRule;

const GROUPS: &[&str] = &["", "apps", "batch", "rbac.authorization.k8s.io"];
const RESOURCES: &[&str] = &["pods", "pods/log", "deployments", "jobs", "configmaps"];
const VERBS: &[&str] = &["get", "list", "watch", "create", "delete"];
const NAMES: &[&str] = &["a", "b", "my-config"];

const STRATEGIES: [StrategyKind; 2] = [StrategyKind::SingleRule, StrategyKind::Decomposed];

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Axis values drawn from `pool`, occasionally including the wildcard.
fn arb_axis(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            9 => prop::sample::select(pool).prop_map(str::to_string),
            1 => Just("*".to_string()),
        ],
        0..4,
    )
}

/// Axis values drawn from `pool` only; never empty, never `"*"`.
fn arb_literal_axis(pool: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(pool).prop_map(str::to_string), 1..4)
}

fn arb_names() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec(
        prop::sample::select(NAMES).prop_map(str::to_string),
        0..3,
    ))
}

fn arb_rule() -> impl Strategy<Value = PolicyRule> {
    (
        arb_axis(GROUPS),
        arb_axis(RESOURCES),
        arb_axis(VERBS),
        arb_names(),
    )
        .prop_map(|(api_groups, resources, verbs, resource_names)| PolicyRule {
            api_groups: Some(api_groups),
            resources: Some(resources),
            verbs: Some(verbs),
            resource_names,
            non_resource_urls: None,
        })
}

/// A rule whose apiGroups never include `"*"`.
fn arb_group_literal_rule() -> impl Strategy<Value = PolicyRule> {
    (
        arb_literal_axis(GROUPS),
        arb_axis(RESOURCES),
        arb_axis(VERBS),
    )
        .prop_map(|(api_groups, resources, verbs)| PolicyRule {
            api_groups: Some(api_groups),
            resources: Some(resources),
            verbs: Some(verbs),
            resource_names: None,
            non_resource_urls: None,
        })
}

fn arb_rules(max: usize) -> impl Strategy<Value = Vec<PolicyRule>> {
    prop::collection::vec(arb_rule(), 0..max)
}

fn covers(user: &[PolicyRule], reference: &[PolicyRule], strategy: StrategyKind) -> bool {
    check_coverage(user, reference, strategy)
        .expect("generated rules are well-formed")
        .covers
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(user in arb_rules(6), reference in arb_rules(6)) {
        for strategy in STRATEGIES {
            let cfg = EffectiveConfig { strategy, ..EffectiveConfig::default() };
            let first = evaluate(&user, &reference, &cfg).expect("well-formed");
            let second = evaluate(&user, &reference, &cfg).expect("well-formed");
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn rules_cover_themselves(rules in arb_rules(6)) {
        for strategy in STRATEGIES {
            prop_assert!(covers(&rules, &rules, strategy));
        }
    }

    #[test]
    fn reference_order_and_duplicates_do_not_matter(
        user in arb_rules(5),
        reference in arb_rules(5)
    ) {
        let mut reversed = reference.clone();
        reversed.reverse();
        let mut doubled = reference.clone();
        doubled.extend(reference.iter().cloned());

        for strategy in STRATEGIES {
            let baseline = covers(&user, &reference, strategy);
            prop_assert_eq!(baseline, covers(&user, &reversed, strategy));
            prop_assert_eq!(baseline, covers(&user, &doubled, strategy));
        }
    }

    #[test]
    fn user_order_and_duplicates_do_not_matter(
        user in arb_rules(5),
        reference in arb_rules(5)
    ) {
        let mut reversed = user.clone();
        reversed.reverse();
        let mut doubled = user.clone();
        doubled.extend(user.iter().cloned());

        for strategy in STRATEGIES {
            let baseline = covers(&user, &reference, strategy);
            prop_assert_eq!(baseline, covers(&reversed, &reference, strategy));
            prop_assert_eq!(baseline, covers(&doubled, &reference, strategy));
        }
    }

    #[test]
    fn empty_user_rules_always_pass(reference in arb_rules(6)) {
        for strategy in STRATEGIES {
            prop_assert!(covers(&[], &reference, strategy));
        }
    }

    #[test]
    fn empty_reference_rejects_any_user_rule(user in prop::collection::vec(arb_rule(), 1..5)) {
        for strategy in STRATEGIES {
            let verdict = check_coverage(&user, &[], strategy).expect("well-formed");
            prop_assert!(!verdict.covers);
            prop_assert_eq!(verdict.violations.len(), user.len());
        }
    }

    #[test]
    fn single_rule_coverage_implies_decomposed(
        user in arb_rules(5),
        reference in arb_rules(5)
    ) {
        if covers(&user, &reference, StrategyKind::SingleRule) {
            prop_assert!(covers(&user, &reference, StrategyKind::Decomposed));
        }
    }

    #[test]
    fn novel_api_group_is_never_covered(
        base in arb_group_literal_rule(),
        reference in prop::collection::vec(arb_group_literal_rule(), 1..5)
    ) {
        let mut escalated = base;
        if let Some(groups) = escalated.api_groups.as_mut() {
            groups.push("novel.example.com".to_string());
        }
        let user = vec![escalated];

        for strategy in STRATEGIES {
            prop_assert!(!covers(&user, &reference, strategy));
        }

        let verdict = check_coverage(&user, &reference, StrategyKind::SingleRule)
            .expect("well-formed");
        let violation = verdict.first_violation().expect("violation");
        prop_assert_eq!(violation.primary().map(|f| f.axis), Some(Axis::ApiGroups));
    }

    #[test]
    fn full_wildcard_reference_covers_everything(user in arb_rules(6)) {
        let reference = vec![PolicyRule::new(&["*"], &["*"], &["*"])];
        for strategy in STRATEGIES {
            prop_assert!(covers(&user, &reference, strategy));
        }
    }
}
