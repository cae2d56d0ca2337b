use anyhow::Context;
use rolecover_settings::{Overrides, ResolvedConfig, RolecoverConfigV1};

/// Parse config text (empty means defaults) and apply CLI overrides.
pub fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        RolecoverConfigV1::default()
    } else {
        rolecover_settings::parse_config_toml(config_text).context("parse config")?
    };
    rolecover_settings::resolve_config(cfg, overrides).context("resolve config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolecover_domain::StrategyKind;

    #[test]
    fn empty_config_uses_defaults() {
        let resolved = load_config("   \n", Overrides::default()).expect("load");
        assert_eq!(resolved.effective.profile, "strict");
        assert_eq!(resolved.effective.strategy, StrategyKind::SingleRule);
    }

    #[test]
    fn invalid_config_has_context() {
        let err = load_config("strategy = \"sometimes\"", Overrides::default()).expect_err("bad");
        assert!(format!("{err:#}").contains("resolve config"));
    }
}
