//! Structured fuzz target for the coverage engine.
//!
//! Goal: for well-formed rules drawn from a small vocabulary, coverage never panics,
//! a collection always covers itself, and anything the single-rule strategy covers
//! the decomposed strategy covers too.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_coverage
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rolecover_domain::{check_coverage, StrategyKind};
use rolecover_types::PolicyRule;

const GROUPS: &[&str] = &["", "apps", "batch", "*"];
const RESOURCES: &[&str] = &["pods", "pods/log", "deployments", "secrets", "*"];
const VERBS: &[&str] = &["get", "list", "watch", "delete", "*"];
const NAMES: &[&str] = &["a", "b"];

#[derive(Arbitrary, Debug)]
struct RuleInput {
    groups: u8,
    resources: u8,
    verbs: u8,
    names: u8,
}

/// Treat each bit of `mask` as "include this vocabulary entry".
fn pick(vocab: &[&str], mask: u8) -> Vec<String> {
    vocab
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, v)| v.to_string())
        .collect()
}

impl RuleInput {
    fn to_rule(&self) -> PolicyRule {
        let names = pick(NAMES, self.names);
        PolicyRule {
            api_groups: Some(pick(GROUPS, self.groups)),
            resources: Some(pick(RESOURCES, self.resources)),
            verbs: Some(pick(VERBS, self.verbs)),
            resource_names: (!names.is_empty()).then_some(names),
            ..PolicyRule::default()
        }
    }
}

#[derive(Arbitrary, Debug)]
struct CoverageInput {
    user: Vec<RuleInput>,
    reference: Vec<RuleInput>,
}

fuzz_target!(|input: CoverageInput| {
    if input.user.len() > 8 || input.reference.len() > 8 {
        return;
    }
    let user: Vec<PolicyRule> = input.user.iter().map(RuleInput::to_rule).collect();
    let reference: Vec<PolicyRule> = input.reference.iter().map(RuleInput::to_rule).collect();

    let Ok(single) = check_coverage(&user, &reference, StrategyKind::SingleRule) else {
        return;
    };
    let Ok(decomposed) = check_coverage(&user, &reference, StrategyKind::Decomposed) else {
        return;
    };
    if single.covers {
        assert!(decomposed.covers);
    }

    if !reference.is_empty() {
        let itself = check_coverage(&reference, &reference, StrategyKind::SingleRule)
            .expect("reference validated above");
        assert!(itself.covers);
    }
});
