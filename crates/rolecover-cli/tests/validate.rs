//! Process-boundary tests for `rolecover validate`.
//!
//! stdout must carry exactly one JSON document; the exit status separates
//! "evaluated" (0) from "could not evaluate" (1).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

#[allow(deprecated)]
fn rolecover_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rolecover").expect("rolecover binary");
    cmd.current_dir(dir.path());
    cmd
}

fn validate_stdin(input: &str) -> (i32, Value) {
    let dir = TempDir::new().expect("temp dir");
    let output = rolecover_cmd(&dir)
        .arg("validate")
        .write_stdin(input)
        .output()
        .expect("run rolecover");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let value: Value = serde_json::from_str(stdout.trim()).expect("stdout is one JSON document");
    (code, value)
}

const REFERENCE: &str = r#"[{"apiGroups":["apps"],"resources":["deployments","replicasets"],"verbs":["get","list","watch","create"]}]"#;

#[test]
fn covered_request_exits_zero() {
    let input = format!(
        r#"{{"userRules":[{{"apiGroups":["apps"],"resources":["deployments"],"verbs":["get","list"]}}],"referenceRules":{REFERENCE}}}"#
    );
    let (code, resp) = validate_stdin(&input);
    assert_eq!(code, 0);
    assert_eq!(resp, serde_json::json!({"covers": true}));
}

#[test]
fn uncovered_request_still_exits_zero() {
    let input = format!(
        r#"{{"userRules":[{{"apiGroups":["apps"],"resources":["deployments"],"verbs":["get","delete"]}}],"referenceRules":{REFERENCE}}}"#
    );
    let (code, resp) = validate_stdin(&input);
    assert_eq!(code, 0);
    assert_eq!(resp["covers"], false);
    assert!(resp.get("error").is_none());
    assert!(resp.get("errorKind").is_none());
    assert_eq!(resp["violation"]["axis"], "verbs");
    assert_eq!(resp["violation"]["missing"], serde_json::json!(["delete"]));
    assert!(resp["explanation"].as_str().unwrap_or_default().contains("delete"));
}

#[test]
fn malformed_json_is_an_input_error() {
    let (code, resp) = validate_stdin(r#"{"userRules": ["#);
    assert_eq!(code, 1);
    assert_eq!(resp["covers"], false);
    assert_eq!(resp["errorKind"], "input");
    assert!(
        resp["error"]
            .as_str()
            .unwrap_or_default()
            .starts_with("error decoding input")
    );
}

#[test]
fn empty_stdin_is_an_input_error() {
    let (code, resp) = validate_stdin("");
    assert_eq!(code, 1);
    assert_eq!(resp["errorKind"], "input");
}

#[test]
fn missing_input_file_is_an_input_error() {
    let dir = TempDir::new().expect("temp dir");
    let output = rolecover_cmd(&dir)
        .args(["validate", "--input", "missing.json"])
        .output()
        .expect("run rolecover");
    assert_eq!(output.status.code(), Some(1));
    let resp: Value = serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(resp["covers"], false);
    assert_eq!(resp["errorKind"], "input");
    let error = resp["error"].as_str().unwrap_or_default();
    assert!(error.contains("read input"), "{error}");
    assert!(error.contains("missing.json"), "{error}");
    assert!(!error.contains("EOF"), "{error}");
}

#[test]
fn non_utf8_stdin_is_an_input_error() {
    let dir = TempDir::new().expect("temp dir");
    let output = rolecover_cmd(&dir)
        .arg("validate")
        .write_stdin(vec![0xff, 0xfe, b'{'])
        .output()
        .expect("run rolecover");
    assert_eq!(output.status.code(), Some(1));
    let resp: Value = serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(resp["errorKind"], "input");
    assert!(resp["error"].as_str().unwrap_or_default().contains("read stdin"));
}

#[test]
fn rule_without_verbs_is_structural() {
    let input = format!(
        r#"{{"userRules":[{{"apiGroups":["apps"],"resources":["deployments"]}}],"referenceRules":{REFERENCE}}}"#
    );
    let (code, resp) = validate_stdin(&input);
    assert_eq!(code, 1);
    assert_eq!(resp["errorKind"], "structural");
    assert!(resp.get("violation").is_none());
}

#[test]
fn input_flag_reads_a_file() {
    let dir = TempDir::new().expect("temp dir");
    let request = dir.path().join("request.json");
    std::fs::write(
        &request,
        format!(r#"{{"userRules":[],"referenceRules":{REFERENCE}}}"#),
    )
    .expect("write request");

    rolecover_cmd(&dir)
        .arg("validate")
        .arg("--input")
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"covers":true}"#));
}

#[test]
fn strategy_flag_changes_the_verdict() {
    let input = r#"{"userRules":[{"apiGroups":["","apps"],"resources":["configmaps","deployments"],"verbs":["get"]}],
        "referenceRules":[{"apiGroups":[""],"resources":["*"],"verbs":["get"]},{"apiGroups":["apps"],"resources":["*"],"verbs":["get"]}]}"#;

    let (_, single) = validate_stdin(input);
    assert_eq!(single["covers"], false);

    let dir = TempDir::new().expect("temp dir");
    let output = rolecover_cmd(&dir)
        .args(["--strategy", "decomposed", "validate"])
        .write_stdin(input)
        .output()
        .expect("run rolecover");
    assert_eq!(output.status.code(), Some(0));
    let resp: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(resp["covers"], true);
}

#[test]
fn invalid_config_is_reported_on_stderr() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("rolecover.toml"), "profile = [").expect("write config");
    rolecover_cmd(&dir)
        .arg("validate")
        .write_stdin(r#"{"userRules":[],"referenceRules":[]}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("rolecover error"));
}
