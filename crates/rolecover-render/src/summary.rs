use crate::{RenderableReport, RenderableVerdictStatus};

/// Plain-text summary: one line per document, then the overall verdict.
pub fn render_summary(report: &RenderableReport) -> String {
    let mut out = String::new();

    for d in &report.documents {
        let label = match &d.name {
            Some(name) => format!("{} ({})", d.path, name),
            None => d.path.clone(),
        };
        if d.covers {
            out.push_str(&format!("VALID    {label}\n"));
        } else {
            let why = d
                .explanation
                .clone()
                .unwrap_or_else(|| format!("{} violation(s)", d.violations));
            out.push_str(&format!("INVALID  {label}: {why}\n"));
        }
    }

    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "pass",
        RenderableVerdictStatus::Fail => "fail",
    };
    let invalid = report.documents.iter().filter(|d| !d.covers).count();
    out.push_str(&format!(
        "{verdict}: {} document(s) checked against {}, {invalid} not covered\n",
        report.data.documents_checked, report.data.reference
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::failing_report;

    #[test]
    fn lists_each_document() {
        let text = render_summary(&failing_report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "VALID    roles/contributor.yaml (contributor)");
        assert_eq!(
            lines[1],
            "INVALID  roles/problematic.yaml: verbs [\"delete\"] not granted"
        );
        assert_eq!(
            lines[2],
            "fail: 2 document(s) checked against reference-role.yaml, 1 not covered"
        );
    }

    #[test]
    fn falls_back_to_violation_count() {
        let mut report = failing_report();
        report.documents[1].explanation = None;
        assert!(render_summary(&report).contains("problematic.yaml: 2 violation(s)"));
    }
}
