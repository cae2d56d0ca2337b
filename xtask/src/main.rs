//! Developer tasks (schema generation, conformance runs).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use rolecover_app::{CheckInput, load_config, run_check, run_validate};
use rolecover_settings::Overrides;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_request_schema() -> schemars::Schema {
    schema_for!(rolecover_types::ValidationRequest)
}

fn generate_response_schema() -> schemars::Schema {
    schema_for!(rolecover_types::ValidationResponse)
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(rolecover_types::CoverageReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(rolecover_settings::RolecoverConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "rolecover.request.v1.json",
            generate: generate_request_schema,
        },
        SchemaSpec {
            filename: "rolecover.response.v1.json",
            generate: generate_response_schema,
        },
        SchemaSpec {
            filename: "rolecover.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "rolecover.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Fail if schemas/ differs from what the current types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }
        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(schema: &schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value(schema).context("Failed to serialize schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))
}

/// Finding codes and check ids are lowercase tokens (`[a-z][a-z0-9_.]*`).
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
}

/// Run every request fixture and the Konflux roles through the app layer and
/// validate the output against the generated schemas.
fn conform() -> anyhow::Result<()> {
    let request_schema = compile(&generate_request_schema())?;
    let response_schema = compile(&generate_response_schema())?;
    let report_schema = compile(&generate_report_schema())?;
    println!("✓ schemas compile");

    let resolved = load_config("", Overrides::default())?;
    let requests_dir = fixtures_dir().join("requests");
    let mut errors = Vec::new();
    let mut count = 0;

    let mut entries: Vec<PathBuf> = fs::read_dir(&requests_dir)
        .with_context(|| format!("Failed to read {}", requests_dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.to_string_lossy().ends_with(".request.json"))
        .collect();
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", name))?;

        let output = run_validate(&text, &resolved.effective);
        let response = serde_json::to_value(&output.response)?;
        for err in response_schema.iter_errors(&response) {
            errors.push(format!("{}: response schema: {}", name, err));
        }
        // Anything that was evaluated must also be a schema-valid request.
        if !output.response.is_error() {
            let request: serde_json::Value = serde_json::from_str(&text)?;
            for err in request_schema.iter_errors(&request) {
                errors.push(format!("{}: request schema: {}", name, err));
            }
        }
        count += 1;
        println!("  ✓ {} (exit {})", name, output.exit_code);
    }

    let konflux = fixtures_dir().join("konflux");
    let reference = Utf8PathBuf::from_path_buf(konflux.join("reference-role.yaml"))
        .map_err(|p| anyhow::anyhow!("non-UTF-8 path: {}", p.display()))?;
    for set in ["allowed", "denied"] {
        let users = vec![
            Utf8PathBuf::from_path_buf(konflux.join("roles").join(set))
                .map_err(|p| anyhow::anyhow!("non-UTF-8 path: {}", p.display()))?,
        ];
        let output = run_check(CheckInput {
            reference: &reference,
            users: &users,
            config_text: "",
            overrides: Overrides::default(),
        })
        .with_context(|| format!("check konflux/{set}"))?;

        let report = serde_json::to_value(&output.report)?;
        for err in report_schema.iter_errors(&report) {
            errors.push(format!("konflux/{}: report schema: {}", set, err));
        }
        for finding in &output.report.findings {
            for token in [&finding.check_id, &finding.code] {
                if !is_valid_token(token) {
                    errors.push(format!("konflux/{}: '{}' is not a valid token", set, token));
                }
            }
        }
        count += 1;
        println!(
            "  ✓ konflux/{} ({} findings)",
            set,
            output.report.findings.len()
        );
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {} conformance runs passed!", count);
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = rolecover_types::explain::all_check_ids();
    let codes = rolecover_types::explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match rolecover_types::explain::lookup_explanation(id) {
            Some(exp) => {
                if exp.title.is_empty() {
                    errors.push(format!("{} '{}' has empty title", kind, id));
                }
                if exp.description.is_empty() {
                    errors.push(format!("{} '{}' has empty description", kind, id));
                }
                if exp.remediation.is_empty() {
                    errors.push(format!("{} '{}' has empty remediation", kind, id));
                }
            }
            None => errors.push(format!("{} '{}' has no explanation", kind, id)),
        }
    }

    for code in codes {
        if rolecover_types::explain::check_for_code(code).is_none() {
            errors.push(format!("Code '{}' is not emitted by any check", code));
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run request and role fixtures, validating output against schemas");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
