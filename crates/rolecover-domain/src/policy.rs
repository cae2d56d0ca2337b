use crate::strategy::{CoverageStrategy, Decomposed, SingleRule};

/// How a user rule may be satisfied by the reference collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyKind {
    /// One reference rule must dominate the whole user rule.
    #[default]
    SingleRule,
    /// Each `(group, resource, verb, name)` request may be covered by a different reference rule.
    Decomposed,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::SingleRule => "single-rule",
            StrategyKind::Decomposed => "decomposed",
        }
    }

    pub fn strategy(self) -> &'static dyn CoverageStrategy {
        match self {
            StrategyKind::SingleRule => &SingleRule,
            StrategyKind::Decomposed => &Decomposed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub strategy: StrategyKind,
    /// Violations kept in the report; the verdict always reflects all of them.
    pub max_findings: usize,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            strategy: StrategyKind::SingleRule,
            max_findings: 200,
        }
    }
}
