use rolecover_domain::{EffectiveConfig, StrategyKind};

/// Preset profiles. Unknown names fall back to `strict`.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "kubernetes" | "k8s" => kubernetes_profile(),
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        strategy: StrategyKind::SingleRule,
        max_findings: 200,
    }
}

// Matches the API server's escalation check: each request may be granted by a different rule.
fn kubernetes_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "kubernetes".to_string(),
        strategy: StrategyKind::Decomposed,
        max_findings: 200,
    }
}

pub fn default_kinds() -> Vec<String> {
    vec!["Role".to_string(), "ClusterRole".to_string()]
}

pub fn default_include() -> Vec<String> {
    vec!["*.yaml".to_string(), "*.yml".to_string()]
}
