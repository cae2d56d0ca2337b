use crate::{LoadOptions, RoleDocument, RuleEntry};
use anyhow::Context;
use camino::Utf8Path;
use rolecover_types::PolicyRule;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    #[serde(default)]
    rules: Option<Vec<serde_yaml::Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    annotations: BTreeMap<String, String>,
}

/// Parse a (possibly multi-document) YAML stream into one role document.
///
/// Documents whose `kind` is not accepted are skipped; a stream with no accepted
/// document is an error. A missing `rules` key is an empty rule list, and a rule
/// without `apiGroups` targets the core group. A rule entry that does not decode is
/// kept in place as an error so the caller can report it against its index.
pub fn parse_role_documents(
    path: &Utf8Path,
    text: &str,
    opts: &LoadOptions,
) -> anyhow::Result<RoleDocument> {
    let mut out: Option<RoleDocument> = None;
    let mut skipped: Vec<String> = Vec::new();

    for (index, de) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = serde_yaml::Value::deserialize(de)
            .with_context(|| format!("yaml document {index}"))?;
        if value.is_null() {
            continue;
        }
        let raw: RawDocument = serde_yaml::from_value(value)
            .with_context(|| format!("role document {index}"))?;

        let kind = raw.kind.unwrap_or_default();
        if !opts.accepts_kind(&kind) {
            tracing::debug!(path = %path, index, kind = %kind, "skipping document");
            skipped.push(if kind.is_empty() { "<none>".to_string() } else { kind });
            continue;
        }

        let rules = raw
            .rules
            .unwrap_or_default()
            .into_iter()
            .map(decode_rule);

        match out.as_mut() {
            Some(doc) => doc.rules.extend(rules),
            None => {
                let metadata = raw.metadata.unwrap_or_default();
                out = Some(RoleDocument {
                    path: path.to_path_buf(),
                    kind,
                    name: metadata.name,
                    description: metadata.annotations.get("description").cloned(),
                    rules: rules.collect(),
                });
            }
        }
    }

    match out {
        Some(doc) => Ok(doc),
        None if skipped.is_empty() => anyhow::bail!("no documents found"),
        None => anyhow::bail!(
            "no document with an accepted kind (found {}; accepted {})",
            skipped.join(", "),
            opts.kinds.join(", ")
        ),
    }
}

fn decode_rule(value: serde_yaml::Value) -> RuleEntry {
    serde_yaml::from_value::<PolicyRule>(value)
        .map(default_core_group)
        .map_err(|e| e.to_string())
}

fn default_core_group(mut rule: PolicyRule) -> PolicyRule {
    if rule.api_groups.is_none() {
        rule.api_groups = Some(vec![String::new()]);
    }
    rule
}
