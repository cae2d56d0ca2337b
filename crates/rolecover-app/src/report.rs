use anyhow::Context;
use rolecover_render::{
    RenderableData, RenderableDocument, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
use rolecover_types::{
    ids, CoverageData, CoverageReport, Finding, Severity, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<CoverageReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse rolecover report")
}

/// A failing report carrying a single `tool.runtime` finding, written when `check` cannot finish.
pub fn runtime_error_report(message: &str) -> CoverageReport {
    let now = OffsetDateTime::now_utc();
    CoverageReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "rolecover".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Run `rolecover explain tool.runtime` for common causes.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: CoverageData {
            findings_total: 1,
            findings_emitted: 1,
            ..CoverageData::default()
        },
    }
}

pub fn serialize_report(report: &CoverageReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CoverageReport) -> RenderableReport {
    let documents = report
        .data
        .documents
        .iter()
        .map(|d| RenderableDocument {
            path: d.path.clone(),
            name: d.name.clone(),
            covers: d.covers,
            violations: d.violations,
            explanation: report
                .findings
                .iter()
                .find(|f| f.location.as_ref().is_some_and(|loc| loc.path == d.path))
                .map(|f| f.message.clone()),
        })
        .collect();

    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        documents,
        data: RenderableData {
            profile: report.data.profile.clone(),
            strategy: report.data.strategy.clone(),
            reference: report.data.reference.clone(),
            documents_checked: report.data.documents_checked,
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.clone(),
            rule: loc.rule,
        }),
        help: f.help.clone(),
    }
}
