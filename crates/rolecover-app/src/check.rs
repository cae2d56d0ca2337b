//! The `check` use case: compare role documents against a reference role and produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rolecover_domain::{
    EffectiveConfig, PermissionGrant, RuleCollection, RuleError, Side, StructuralError, Violation,
};
use rolecover_repo::{LoadOptions, RoleDocument, RuleEntry};
use rolecover_settings::{Overrides, ResolvedConfig};
use rolecover_types::{
    ids, CoverageData, CoverageReport, DocumentOutcome, Finding, Location, Severity, ToolMeta,
    Verdict, SCHEMA_REPORT_V1,
};
use serde_json::json;
use time::OffsetDateTime;

use crate::config::load_config;
use crate::fingerprint::fingerprint_for_rule;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// The trusted reference role document.
    pub reference: &'a Utf8Path,
    /// User role files or directories of role files.
    pub users: &'a [Utf8PathBuf],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: CoverageReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: resolve config, load documents, evaluate each, produce a report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = load_config(input.config_text, input.overrides.clone())?;
    let opts = LoadOptions {
        kinds: resolved.documents.kinds.clone(),
        include: resolved.documents.include.clone(),
    };

    let reference_doc = rolecover_repo::load_role_document(input.reference, &opts)
        .context("load reference role")?;
    let reference = collect_rules(Side::Reference, &reference_doc.rules)
        .with_context(|| format!("reference role {}", reference_doc.path))?;

    let paths = rolecover_repo::expand_inputs(input.users, &opts).context("expand user inputs")?;
    if paths.is_empty() {
        anyhow::bail!("no user role documents found");
    }
    let docs = rolecover_repo::load_many(&paths, &opts).context("load user roles")?;

    tracing::info!(
        reference = %reference_doc.path,
        documents = docs.len(),
        profile = %resolved.effective.profile,
        strategy = resolved.effective.strategy.as_str(),
        "checking role documents"
    );

    // Truncation applies across all documents, not per document.
    let unbounded = EffectiveConfig {
        max_findings: usize::MAX,
        ..resolved.effective.clone()
    };

    let mut findings = Vec::new();
    let mut outcomes = Vec::new();
    let mut user_rules_total: u32 = 0;

    for doc in &docs {
        user_rules_total = user_rules_total.saturating_add(count(doc.rules.len()));
        let doc_findings = match collect_rules(Side::User, &doc.rules) {
            Err(err) => vec![structural_finding(doc, &err)],
            Ok(user) => {
                let report = rolecover_domain::evaluate_grants(&user, &reference, &unbounded);
                report
                    .verdict
                    .violations
                    .iter()
                    .map(|v| violation_finding(doc, v))
                    .collect()
            }
        };

        let covers = doc_findings.is_empty();
        if covers {
            tracing::info!(path = %doc.path, "covered");
        } else {
            tracing::info!(path = %doc.path, violations = doc_findings.len(), "not covered");
        }
        outcomes.push(DocumentOutcome {
            path: doc.path.to_string(),
            name: doc.name.clone(),
            covers,
            violations: count(doc_findings.len()),
        });
        findings.extend(doc_findings);
    }

    let findings_total = count(findings.len());
    let max = resolved.effective.max_findings;
    let mut truncated_reason = None;
    if findings.len() > max {
        findings.truncate(max);
        truncated_reason = Some(format!("findings truncated to max_findings={max}"));
    }

    let verdict = if outcomes.iter().all(|o| o.covers) {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    let report = CoverageReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "rolecover".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data: CoverageData {
            profile: resolved.effective.profile.clone(),
            strategy: resolved.effective.strategy.as_str().to_string(),
            reference: reference_doc.path.to_string(),
            documents_checked: count(docs.len()),
            user_rules: user_rules_total,
            reference_rules: count(reference.len()),
            findings_total,
            findings_emitted: count(findings.len()),
            truncated_reason,
            documents: outcomes,
        },
        findings,
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Validate entries in order; a rule that failed to decode is reported at its index.
fn collect_rules(side: Side, entries: &[RuleEntry]) -> Result<RuleCollection, StructuralError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let rule = entry.as_ref().map_err(|msg| {
                StructuralError::new(side, index, RuleError::Malformed(msg.clone()))
            })?;
            PermissionGrant::from_rule(rule).map_err(|cause| StructuralError::new(side, index, cause))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RuleCollection::from)
}

/// Report counts are `u32` on the wire; larger values saturate.
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn violation_finding(doc: &RoleDocument, v: &Violation) -> Finding {
    let code = v.code();
    let rule = count(v.rule_index);
    let axis = v.axis_name();
    Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_RBAC_COVERAGE.to_string(),
        code: code.to_string(),
        message: v.explanation(),
        location: Some(Location {
            path: doc.path.to_string(),
            rule: Some(rule),
        }),
        help: help_for(code),
        fingerprint: Some(fingerprint_for_rule(
            ids::CHECK_RBAC_COVERAGE,
            code,
            doc.path.as_str(),
            Some(rule),
            Some(axis),
        )),
        data: json!({
            "axis": axis,
            "missing": v.missing_values(),
            "closestReference": v.uncovered.closest,
            "rule": v.rule.to_string(),
        }),
    }
}

fn structural_finding(doc: &RoleDocument, err: &StructuralError) -> Finding {
    let rule = count(err.index);
    Finding {
        severity: Severity::Error,
        check_id: ids::CHECK_INPUT_STRUCTURAL.to_string(),
        code: ids::CODE_STRUCTURAL_ERROR.to_string(),
        message: err.to_string(),
        location: Some(Location {
            path: doc.path.to_string(),
            rule: Some(rule),
        }),
        help: help_for(ids::CODE_STRUCTURAL_ERROR),
        fingerprint: Some(fingerprint_for_rule(
            ids::CHECK_INPUT_STRUCTURAL,
            ids::CODE_STRUCTURAL_ERROR,
            doc.path.as_str(),
            Some(rule),
            None,
        )),
        data: serde_json::Value::Null,
    }
}

/// First paragraph of the registered remediation.
fn help_for(code: &str) -> Option<String> {
    let exp = rolecover_types::lookup_explanation(code)?;
    let first = exp.remediation.split("\n\n").next().unwrap_or(exp.remediation);
    Some(first.replace('\n', " "))
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}
