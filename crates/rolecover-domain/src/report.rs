use crate::model::{Axis, PermissionGrant, Side};
use rolecover_types::{ids, WILDCARD};
use std::fmt;

/// What a user rule asked for on one axis that a reference rule did not grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Missing {
    /// The request was unbounded on the axis (`"*"`, or no resourceNames).
    Everything,
    Values(Vec<String>),
}

impl Missing {
    /// Wire form: `["*"]` for an unbounded request.
    pub fn to_values(&self) -> Vec<String> {
        match self {
            Missing::Everything => vec![WILDCARD.to_string()],
            Missing::Values(values) => values.clone(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Missing::Everything => 1,
            Missing::Values(values) => values.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisFailure {
    pub axis: Axis,
    pub missing: Missing,
}

impl fmt::Display for AxisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.missing, self.axis) {
            (Missing::Everything, Axis::ResourceNames) => f.write_str(
                "resourceNames unscoped, but the reference rule is limited to named instances",
            ),
            (Missing::Everything, axis) => {
                write!(f, "{axis} [{WILDCARD:?}] requires a wildcard grant")
            }
            (Missing::Values(values), axis) => write!(f, "{axis} {values:?} not granted"),
        }
    }
}

/// Why a user grant (or one atom of it) is not covered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uncovered {
    /// Index of the reference rule that came closest; `None` when there were none.
    pub closest: Option<usize>,
    /// Failing axes against `closest`, in canonical order.
    pub failures: Vec<AxisFailure>,
    /// Set when only part of the user grant was left uncovered.
    pub atom: Option<PermissionGrant>,
}

impl Uncovered {
    pub fn no_reference_rules() -> Self {
        Self {
            closest: None,
            failures: Vec::new(),
            atom: None,
        }
    }

    /// Rank for picking the closest reference rule: fewer failing axes first,
    /// then fewer missing values.
    pub(crate) fn distance(failures: &[AxisFailure]) -> (usize, usize) {
        (
            failures.len(),
            failures.iter().map(|f| f.missing.len()).sum(),
        )
    }
}

/// A user rule that no reference rule covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub rule_index: usize,
    pub rule: PermissionGrant,
    pub uncovered: Uncovered,
}

impl Violation {
    /// The first failing axis, which names the violation.
    pub fn primary(&self) -> Option<&AxisFailure> {
        self.uncovered.failures.first()
    }

    pub fn code(&self) -> &'static str {
        match self.primary() {
            Some(failure) => failure.axis.code(),
            None => ids::CODE_NO_REFERENCE_RULES,
        }
    }

    /// Wire name of the primary axis, or `referenceRules` when there was nothing to compare.
    pub fn axis_name(&self) -> &'static str {
        match self.primary() {
            Some(failure) => failure.axis.as_str(),
            None => "referenceRules",
        }
    }

    pub fn missing_values(&self) -> Vec<String> {
        self.primary()
            .map(|failure| failure.missing.to_values())
            .unwrap_or_default()
    }

    pub fn explanation(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {} is not covered",
            Side::User,
            self.rule_index,
            self.rule
        )?;
        let Some(closest) = self.uncovered.closest else {
            return f.write_str(": there are no reference rules");
        };
        if let Some(atom) = &self.uncovered.atom {
            write!(f, " (request {atom})")?;
        }
        let reasons: Vec<String> = self.uncovered.failures.iter().map(|x| x.to_string()).collect();
        write!(
            f,
            ": {}; closest reference rule is {}[{}]",
            reasons.join("; "),
            Side::Reference,
            closest
        )
    }
}

/// Result of one evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub covers: bool,
    /// Uncovered user rules in user-rule order (possibly truncated, see `DomainReport`).
    pub violations: Vec<Violation>,
}

impl Verdict {
    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn explanation(&self) -> Option<String> {
        self.first_violation().map(Violation::explanation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub strategy: &'static str,
    pub user_rules: usize,
    pub reference_rules: usize,
    pub violations_total: usize,
    pub truncated_reason: Option<String>,
}
