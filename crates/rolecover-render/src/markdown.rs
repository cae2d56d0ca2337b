use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Rolecover report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Reference: `{}`\n- Profile: {} (strategy: {})\n- Documents: {}\n- Findings: {} (emitted) / {} (total)\n\n",
        verdict,
        report.data.reference,
        report.data.profile,
        report.data.strategy,
        report.data.documents_checked,
        report.data.findings_emitted,
        report.data.findings_total
    ));

    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if !report.documents.is_empty() {
        out.push_str("## Documents\n\n| Document | Name | Result |\n| --- | --- | --- |\n");
        for d in &report.documents {
            let result = if d.covers {
                "covered".to_string()
            } else {
                format!("{} violation(s)", d.violations)
            };
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                d.path,
                d.name.as_deref().unwrap_or("-"),
                result
            ));
        }
        out.push('\n');
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        let mut line = format!(
            "- [{}] `{}` / `{}`: {}",
            sev,
            f.check_id.as_deref().unwrap_or(""),
            f.code,
            f.message
        );
        if let Some(loc) = &f.location {
            match loc.rule {
                Some(rule) => line.push_str(&format!(" (`{}` rule {})", loc.path, rule)),
                None => line.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        out.push_str(&line);
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
