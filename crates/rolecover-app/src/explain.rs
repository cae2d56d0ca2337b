//! The `explain` use case: describe a check id or finding code for the terminal.

use rolecover_types::explain::{self, Explanation};
use rolecover_types::ids;

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Topic),
    NotFound { identifier: String },
}

/// A resolved identifier and where it sits in the check/code catalog.
#[derive(Clone, Debug)]
pub struct Topic {
    pub identifier: String,
    pub explanation: Explanation,
    pub kind: TopicKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TopicKind {
    /// A check id and the codes it can emit.
    Check { codes: &'static [&'static str] },
    /// A finding code and the check that emits it.
    Code { check_id: &'static str },
}

impl Topic {
    /// The check whose findings this topic is about.
    pub fn check_id(&self) -> &str {
        match self.kind {
            TopicKind::Check { .. } => &self.identifier,
            TopicKind::Code { check_id } => check_id,
        }
    }
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let Some(explanation) = explain::lookup_explanation(identifier) else {
        return ExplainOutput::NotFound {
            identifier: identifier.to_string(),
        };
    };
    let kind = match explain::check_for_code(identifier) {
        Some(check_id) => TopicKind::Code { check_id },
        None => TopicKind::Check {
            codes: explain::codes_for_check(identifier),
        },
    };
    ExplainOutput::Found(Topic {
        identifier: identifier.to_string(),
        explanation,
        kind,
    })
}

/// Captions for the before/after role snippets of a check.
fn example_captions(check_id: &str) -> (&'static str, &'static str) {
    match check_id {
        ids::CHECK_RBAC_COVERAGE => (
            "User rule the reference role does not cover",
            "Narrowed until a reference rule covers it",
        ),
        ids::CHECK_INPUT_STRUCTURAL => ("Rejected before evaluation", "Well-formed rule"),
        _ => ("Fails to load", "Loads"),
    }
}

fn push_heading(out: &mut String, text: &str, underline: char) {
    out.push_str(text);
    out.push('\n');
    out.extend(std::iter::repeat(underline).take(text.chars().count()));
    out.push('\n');
}

fn push_yaml(out: &mut String, caption: &str, yaml: &str) {
    out.push_str(caption);
    out.push_str(":\n\n");
    for line in yaml.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

pub fn format_explanation(topic: &Topic) -> String {
    let exp = &topic.explanation;
    let mut out = String::new();

    push_heading(&mut out, &format!("{} ({})", exp.title, topic.identifier), '=');
    match topic.kind {
        TopicKind::Code { check_id } => {
            out.push_str(&format!("Reported by check `{check_id}`.\n"));
        }
        TopicKind::Check { codes } if !codes.is_empty() => {
            out.push_str("Finding codes:\n");
            for code in codes {
                let title = explain::lookup_explanation(code).map_or("", |e| e.title);
                out.push_str(&format!("  {code:<28} {title}\n"));
            }
        }
        TopicKind::Check { .. } => {}
    }
    out.push('\n');
    out.push_str(exp.description);
    out.push_str("\n\n");

    push_heading(&mut out, "How to fix", '-');
    out.push_str(exp.remediation);
    out.push_str("\n\n");

    let (before, after) = example_captions(topic.check_id());
    push_yaml(&mut out, before, exp.examples.before);
    push_yaml(&mut out, after, exp.examples.after);
    out
}

/// Error text for an unknown identifier: every check with the codes it emits.
pub fn format_not_found(identifier: &str) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n\nKnown checks and codes:\n");
    for check_id in explain::all_check_ids() {
        out.push_str(&format!("  {check_id}\n"));
        for code in explain::codes_for_check(check_id) {
            out.push_str(&format!("    - {code}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(identifier: &str) -> Topic {
        match run_explain(identifier) {
            ExplainOutput::Found(topic) => topic,
            ExplainOutput::NotFound { .. } => panic!("expected {identifier} to resolve"),
        }
    }

    #[test]
    fn check_id_lists_its_codes() {
        let topic = found("rbac.coverage");
        let TopicKind::Check { codes } = topic.kind else {
            panic!("expected a check");
        };
        assert!(codes.contains(&ids::CODE_VERBS_NOT_COVERED));
        assert!(!codes.contains(&ids::CODE_STRUCTURAL_ERROR));
    }

    #[test]
    fn code_points_at_its_check() {
        let topic = found("verbs_not_covered");
        assert_eq!(
            topic.kind,
            TopicKind::Code {
                check_id: ids::CHECK_RBAC_COVERAGE
            }
        );
        assert_eq!(topic.check_id(), "rbac.coverage");
    }

    #[test]
    fn unknown_identifier_is_not_found() {
        let ExplainOutput::NotFound { identifier } = run_explain("not_a_real_thing") else {
            panic!("expected NotFound");
        };
        assert_eq!(identifier, "not_a_real_thing");
    }

    #[test]
    fn coverage_code_uses_coverage_captions() {
        let formatted = format_explanation(&found("resource_names_not_covered"));
        let heading = "Resource Names Not Covered (resource_names_not_covered)";
        assert!(formatted.starts_with(&format!("{heading}\n{}\n", "=".repeat(heading.len()))));
        assert!(formatted.contains("Reported by check `rbac.coverage`."));
        assert!(formatted.contains("How to fix\n----------\n"));
        assert!(formatted.contains("User rule the reference role does not cover:\n"));
        assert!(formatted.contains("    resourceNames: [\"my-config\"]"));
    }

    #[test]
    fn structural_check_uses_its_own_captions() {
        let formatted = format_explanation(&found("input.structural"));
        assert!(formatted.contains("Finding codes:\n  structural_error"));
        assert!(formatted.contains("Rejected before evaluation:\n"));
        assert!(!formatted.contains("reference role does not cover"));
    }

    #[test]
    fn not_found_groups_codes_under_checks() {
        let formatted = format_not_found("missing");
        assert!(formatted.starts_with("Unknown check_id or code: missing\n"));
        assert!(formatted.contains("  rbac.coverage\n    - api_groups_not_covered\n"));
        assert!(formatted.contains("  tool.runtime\n    - runtime_error\n"));
    }
}
