use crate::{model::RolecoverConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use rolecover_domain::{EffectiveConfig, StrategyKind};

/// Values from the command line; each beats the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub strategy: Option<String>,
    pub max_findings: Option<u32>,
}

/// Validated document selection handed to the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentsPolicy {
    pub kinds: Vec<String>,
    pub include: Vec<String>,
}

impl Default for DocumentsPolicy {
    fn default() -> Self {
        Self {
            kinds: presets::default_kinds(),
            include: presets::default_include(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub documents: DocumentsPolicy,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            effective: presets::preset("strict"),
            documents: DocumentsPolicy::default(),
        }
    }
}

pub fn resolve_config(
    cfg: RolecoverConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    if let Some(strategy) = overrides.strategy.clone().or(cfg.strategy.clone()) {
        effective.strategy = parse_strategy(&strategy)?;
    }

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    let mut documents = DocumentsPolicy::default();
    if let Some(kinds) = cfg.documents.kinds {
        if kinds.is_empty() {
            anyhow::bail!("documents.kinds must list at least one kind");
        }
        documents.kinds = kinds;
    }
    if let Some(include) = cfg.documents.include {
        validate_globs(&include)?;
        documents.include = include;
    }

    Ok(ResolvedConfig {
        effective,
        documents,
    })
}

fn validate_globs(patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid documents.include glob: {pattern}"))?;
    }
    Ok(())
}

fn parse_strategy(v: &str) -> anyhow::Result<StrategyKind> {
    match v {
        "single-rule" => Ok(StrategyKind::SingleRule),
        "decomposed" => Ok(StrategyKind::Decomposed),
        other => anyhow::bail!("unknown strategy: {other} (expected 'single-rule' or 'decomposed')"),
    }
}
