//! Config parsing and profile/preset resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{DocumentsConfig, RolecoverConfigV1, SCHEMA_CONFIG_V1};
pub use resolve::{DocumentsPolicy, Overrides, ResolvedConfig};

/// Parse `rolecover.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<RolecoverConfigV1> {
    let cfg: RolecoverConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profile + file values + overrides).
pub fn resolve_config(
    cfg: RolecoverConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
