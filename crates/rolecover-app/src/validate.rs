//! The `validate` use case: the JSON process boundary.
//!
//! Three outcomes are always kept apart: covered, not covered (with a reason), and
//! input that could not be evaluated (with `errorKind` saying why).

use rolecover_domain::{EffectiveConfig, RuleError, Side, StructuralError, Violation};
use rolecover_types::{ErrorKind, PolicyRule, ValidationResponse, ViolationDetail};
use serde_json::Value;

/// Exit status when the request was evaluated, whatever the verdict.
pub const EXIT_EVALUATED: i32 = 0;
/// Exit status when the request could not be evaluated.
pub const EXIT_REJECTED_INPUT: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateOutput {
    pub response: ValidationResponse,
    pub exit_code: i32,
}

enum RequestError {
    Input(String),
    Structural(String),
}

struct Request {
    user_rules: Vec<PolicyRule>,
    reference_rules: Vec<PolicyRule>,
}

/// Parse a JSON request, evaluate it, and build the response.
pub fn run_validate(input: &str, cfg: &EffectiveConfig) -> ValidateOutput {
    let request = match parse_request(input) {
        Ok(request) => request,
        Err(RequestError::Input(msg)) => {
            tracing::debug!(error = %msg, "request rejected: input");
            return rejected(ErrorKind::Input, msg);
        }
        Err(RequestError::Structural(msg)) => {
            tracing::debug!(error = %msg, "request rejected: structural");
            return rejected(ErrorKind::Structural, msg);
        }
    };

    match rolecover_domain::evaluate(&request.user_rules, &request.reference_rules, cfg) {
        Err(err) => rejected(ErrorKind::Structural, err.to_string()),
        Ok(report) => {
            tracing::debug!(
                strategy = report.strategy,
                user_rules = report.user_rules,
                reference_rules = report.reference_rules,
                violations = report.violations_total,
                "request evaluated"
            );
            let response = match report.verdict.first_violation() {
                None => ValidationResponse::covered(),
                Some(v) => ValidationResponse::not_covered(v.explanation(), violation_detail(v)),
            };
            ValidateOutput {
                response,
                exit_code: EXIT_EVALUATED,
            }
        }
    }
}

/// Response for a request that could not even be read.
pub fn reject_input(error: String) -> ValidateOutput {
    tracing::debug!(error = %error, "request rejected: unreadable");
    rejected(ErrorKind::Input, error)
}

fn rejected(kind: ErrorKind, error: String) -> ValidateOutput {
    ValidateOutput {
        response: ValidationResponse::failed(kind, error),
        exit_code: EXIT_REJECTED_INPUT,
    }
}

fn violation_detail(v: &Violation) -> ViolationDetail {
    ViolationDetail {
        rule_index: v.rule_index,
        axis: v.axis_name().to_string(),
        missing: v.missing_values(),
        closest_reference: v.uncovered.closest,
    }
}

/// Two stages: the payload must be JSON at all (`input`), then it must hold two
/// arrays of well-formed rule objects (`structural`).
fn parse_request(input: &str) -> Result<Request, RequestError> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| RequestError::Input(format!("error decoding input: {e}")))?;

    let Value::Object(mut map) = value else {
        return Err(RequestError::Structural(
            "request must be a JSON object with `userRules` and `referenceRules`".to_string(),
        ));
    };

    let user_rules = take_collection(&mut map, Side::User)?;
    let reference_rules = take_collection(&mut map, Side::Reference)?;
    Ok(Request {
        user_rules,
        reference_rules,
    })
}

fn take_collection(
    map: &mut serde_json::Map<String, Value>,
    side: Side,
) -> Result<Vec<PolicyRule>, RequestError> {
    let key = side.to_string();
    let items = match map.remove(&key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => {
            return Err(RequestError::Structural(format!(
                "missing required field `{key}`"
            )));
        }
        Some(_) => {
            return Err(RequestError::Structural(format!("`{key}` must be an array")));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<PolicyRule>(item).map_err(|e| {
                let err = StructuralError::new(side, index, RuleError::Malformed(e.to_string()));
                RequestError::Structural(err.to_string())
            })
        })
        .collect()
}
