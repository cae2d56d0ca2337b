//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after role examples.
    pub examples: ExamplePair,
}

/// Before and after role examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// A user rule that would trigger a finding.
    pub before: &'static str,
    /// A user rule that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_RBAC_COVERAGE => Some(explain_coverage()),
        ids::CHECK_INPUT_STRUCTURAL => Some(explain_input_structural()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_API_GROUPS_NOT_COVERED => Some(explain_api_groups_not_covered()),
        ids::CODE_RESOURCES_NOT_COVERED => Some(explain_resources_not_covered()),
        ids::CODE_VERBS_NOT_COVERED => Some(explain_verbs_not_covered()),
        ids::CODE_RESOURCE_NAMES_NOT_COVERED => Some(explain_resource_names_not_covered()),
        ids::CODE_NO_REFERENCE_RULES => Some(explain_no_reference_rules()),
        ids::CODE_STRUCTURAL_ERROR => Some(explain_input_structural()),
        ids::CODE_RUNTIME_ERROR => Some(explain_tool_runtime()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_RBAC_COVERAGE,
        ids::CHECK_INPUT_STRUCTURAL,
        ids::CHECK_TOOL_RUNTIME,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_API_GROUPS_NOT_COVERED,
        ids::CODE_RESOURCES_NOT_COVERED,
        ids::CODE_VERBS_NOT_COVERED,
        ids::CODE_RESOURCE_NAMES_NOT_COVERED,
        ids::CODE_NO_REFERENCE_RULES,
        ids::CODE_STRUCTURAL_ERROR,
        ids::CODE_RUNTIME_ERROR,
    ]
}

/// Codes a check can emit, in report order. Empty for an unknown check.
pub fn codes_for_check(check_id: &str) -> &'static [&'static str] {
    match check_id {
        ids::CHECK_RBAC_COVERAGE => &[
            ids::CODE_API_GROUPS_NOT_COVERED,
            ids::CODE_RESOURCES_NOT_COVERED,
            ids::CODE_VERBS_NOT_COVERED,
            ids::CODE_RESOURCE_NAMES_NOT_COVERED,
            ids::CODE_NO_REFERENCE_RULES,
        ],
        ids::CHECK_INPUT_STRUCTURAL => &[ids::CODE_STRUCTURAL_ERROR],
        ids::CHECK_TOOL_RUNTIME => &[ids::CODE_RUNTIME_ERROR],
        _ => &[],
    }
}

/// The check that emits `code`.
pub fn check_for_code(code: &str) -> Option<&'static str> {
    all_check_ids()
        .iter()
        .copied()
        .find(|check_id| codes_for_check(check_id).contains(&code))
}

// --- Check-level explanations ---

fn explain_coverage() -> Explanation {
    Explanation {
        title: "Rule Coverage",
        description: "\
Checks that every permission granted by a proposed role (the user rules) is already
granted by a trusted reference role.

A user rule is covered when a reference rule grants, on every axis at once:
- each requested API group (or `*`)
- each requested resource (or `*`)
- each requested verb (or `*`)
- the requested resource names (an unscoped reference rule grants every name)

A `*` in the user rule asks for everything on that axis, so only a `*` in the
reference rule can satisfy it. Comparisons are exact and case-sensitive.",
        remediation: "\
Narrow the user rule until it fits inside a single reference rule, or ask the owner
of the reference role to grant the missing permission there first.

Run `rolecover explain <code>` for the axis-specific finding codes.",
        examples: ExamplePair {
            before: r#"# reference: apps/deployments get,list
- apiGroups: ["apps"]
  resources: ["deployments"]
  verbs: ["get", "delete"]"#,
            after: r#"# reference: apps/deployments get,list
- apiGroups: ["apps"]
  resources: ["deployments"]
  verbs: ["get"]"#,
        },
    }
}

fn explain_input_structural() -> Explanation {
    Explanation {
        title: "Structurally Invalid Rules",
        description: "\
The input parsed, but is not a well-formed pair of rule collections. Causes include:
- a rule without `resources` or `verbs` (and, in requests, without `apiGroups`)
- axis entries that are not strings
- a rule using `nonResourceURLs`, which coverage checks do not evaluate
- unknown keys on a rule

Structural errors are never coerced into a verdict; nothing was evaluated.",
        remediation: "\
Fix the rule the error message points at. Every rule needs `apiGroups`, `resources`
and `verbs` lists of strings. Use `\"\"` for the core API group.",
        examples: ExamplePair {
            before: r#"- resources: ["pods"]
  verb: ["get"]"#,
            after: r#"- apiGroups: [""]
  resources: ["pods"]
  verbs: ["get"]"#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "\
rolecover could not finish: a role document was unreadable, was not valid YAML,
had an unexpected `kind`, or the configuration was invalid.",
        remediation: "\
Check the error message for the file and cause. Only Role and ClusterRole documents
are accepted by default; see the `[documents]` table in rolecover.toml.",
        examples: ExamplePair {
            before: r#"kind: ConfigMap
metadata:
  name: not-a-role"#,
            after: r#"kind: ClusterRole
metadata:
  name: custom-role
rules: []"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_api_groups_not_covered() -> Explanation {
    Explanation {
        title: "API Group Not Covered",
        description: "\
The user rule names an API group that no reference rule grants together with the
rest of the rule. The core group is the empty string `\"\"` and is distinct from
every named group; it is only matched by `\"\"` or `*`.",
        remediation: "\
Remove the extra API group from the user rule, or split it into a separate rule
that the reference role does cover.",
        examples: ExamplePair {
            before: r#"- apiGroups: ["", "custom.io"]
  resources: ["configmaps"]
  verbs: ["get"]"#,
            after: r#"- apiGroups: [""]
  resources: ["configmaps"]
  verbs: ["get"]"#,
        },
    }
}

fn explain_resources_not_covered() -> Explanation {
    Explanation {
        title: "Resource Not Covered",
        description: "\
The user rule names a resource that no reference rule grants together with the
rest of the rule. Subresources such as `pods/log` are distinct literal values;
`pods/*` is not a pattern.",
        remediation: "\
Drop the uncovered resource or request only the subresources the reference role
lists explicitly.",
        examples: ExamplePair {
            before: r#"- apiGroups: [""]
  resources: ["pods", "services"]
  verbs: ["get"]"#,
            after: r#"- apiGroups: [""]
  resources: ["pods"]
  verbs: ["get"]"#,
        },
    }
}

fn explain_verbs_not_covered() -> Explanation {
    Explanation {
        title: "Verb Not Covered",
        description: "\
The user rule asks for an action the reference role does not allow on the same
group and resource. A `verbs: [\"*\"]` request is only covered by a `*` reference
rule, never by an enumeration of concrete verbs.",
        remediation: "\
Remove the escalating verb, typically a write verb such as `delete` or `create`.",
        examples: ExamplePair {
            before: r#"- apiGroups: ["apps"]
  resources: ["deployments"]
  verbs: ["get", "delete"]"#,
            after: r#"- apiGroups: ["apps"]
  resources: ["deployments"]
  verbs: ["get"]"#,
        },
    }
}

fn explain_resource_names_not_covered() -> Explanation {
    Explanation {
        title: "Resource Names Not Covered",
        description: "\
The reference rule is scoped to specific `resourceNames`, but the user rule either
is unscoped (asks for every instance) or names instances outside that list.
An unscoped reference rule covers any name-scoped request; the reverse never holds.",
        remediation: "\
Scope the user rule to the names the reference rule lists.",
        examples: ExamplePair {
            before: r#"- apiGroups: [""]
  resources: ["configmaps"]
  verbs: ["get"]"#,
            after: r#"- apiGroups: [""]
  resources: ["configmaps"]
  verbs: ["get"]
  resourceNames: ["my-config"]"#,
        },
    }
}

fn explain_no_reference_rules() -> Explanation {
    Explanation {
        title: "No Reference Rules",
        description: "\
The reference role has no rules, so it grants nothing and no user rule can be
covered by it.",
        remediation: "\
Point rolecover at the intended reference role, or remove all rules from the
user role.",
        examples: ExamplePair {
            before: r#"rules: []  # reference role"#,
            after: r#"rules:
- apiGroups: [""]
  resources: ["pods"]
  verbs: ["get"]"#,
        },
    }
}
