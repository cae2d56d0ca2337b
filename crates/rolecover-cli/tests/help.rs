use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn rolecover_cmd() -> Command {
    Command::cargo_bin("rolecover").unwrap()
}

#[test]
fn help_works() {
    rolecover_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_subcommands() {
    rolecover_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn check_requires_user_roles() {
    rolecover_cmd()
        .args(["check", "--reference", "ref.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user"));
}

#[test]
fn explain_known_code() {
    rolecover_cmd()
        .args(["explain", "verbs_not_covered"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Verb Not Covered (verbs_not_covered)"))
        .stdout(predicate::str::contains("Reported by check `rbac.coverage`."));
}

#[test]
fn explain_unknown_identifier_fails() {
    rolecover_cmd()
        .args(["explain", "nope.nothing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: nope.nothing"))
        .stderr(predicate::str::contains("  rbac.coverage\n    - api_groups_not_covered"));
}
