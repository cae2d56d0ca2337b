//! CLI entry point for rolecover.
//!
//! This module is thin: it handles argument parsing, I/O, logging setup, and exit codes.
//! All business logic lives in the `rolecover-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use rolecover_app::{
    format_explanation, format_not_found, load_config, parse_report_json, render_annotations,
    reject_input, render_markdown, render_summary, run_check, run_explain, run_validate,
    runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code, CheckInput, ExplainOutput,
};
use rolecover_settings::Overrides;
use rolecover_types::CoverageReport;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rolecover",
    version,
    about = "Check that proposed RBAC roles are covered by a trusted reference role"
)]
struct Cli {
    /// Path to rolecover config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "rolecover.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|kubernetes).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override coverage strategy (single-rule|decomposed).
    #[arg(long, global = true)]
    strategy: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Increase log verbosity on stderr (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a JSON request ({userRules, referenceRules}) and print a JSON verdict.
    Validate {
        /// Request file; reads stdin when omitted.
        #[arg(long)]
        input: Option<Utf8PathBuf>,
    },

    /// Check role documents against a reference role and write a report.
    Check {
        /// The trusted reference Role or ClusterRole.
        #[arg(long)]
        reference: Utf8PathBuf,

        /// User role files or directories (repeatable).
        #[arg(long = "user", required = true)]
        users: Vec<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/rolecover/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/rolecover/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/rolecover/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/rolecover/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "rbac.coverage") or code (e.g., "verbs_not_covered") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.cmd {
        Commands::Validate { input } => cmd_validate(&cli, input.as_deref()),
        Commands::Check {
            reference,
            users,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(&cli, reference, users, report_out, *write_markdown, markdown_out),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Logs go to stderr so stdout carries only protocol output.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        strategy: cli.strategy.clone(),
        max_findings: cli.max_findings,
    }
}

/// Missing config file is allowed (defaults apply); unreadable is not.
fn read_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn cmd_validate(cli: &Cli, input: Option<&Utf8Path>) -> anyhow::Result<()> {
    let resolved = read_config_text(&cli.config)
        .and_then(|text| load_config(&text, overrides(cli)));
    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("rolecover error: {err:#}");
            std::process::exit(1);
        }
    };

    // Unreadable input is reported through the response body like any other bad payload.
    let output = match read_input(input) {
        Ok(text) => run_validate(&text, &resolved.effective),
        Err(err) => reject_input(format!("{err:#}")),
    };
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &output.response).context("write response")?;
    writeln!(stdout).context("write response")?;
    stdout.flush().context("flush stdout")?;
    drop(stdout);

    if output.exit_code != 0 {
        std::process::exit(output.exit_code);
    }
    Ok(())
}

fn read_input(input: Option<&Utf8Path>) -> anyhow::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("read input: {path}")),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}

fn cmd_check(
    cli: &Cli,
    reference: &Utf8Path,
    users: &[Utf8PathBuf],
    report_out: &Utf8Path,
    write_markdown: bool,
    markdown_out: &Utf8Path,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config_text(&cli.config)?;
        let output = run_check(CheckInput {
            reference,
            users,
            config_text: &cfg_text,
            overrides: overrides(cli),
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if write_markdown {
            let md = render_markdown(&renderable);
            write_text_file(markdown_out, &md).context("write markdown")?;
        }
        eprint!("{}", render_summary(&renderable));

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("rolecover error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &CoverageReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let annotations = render_annotations(&to_renderable(&report), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(topic) => {
            print!("{}", format_explanation(&topic));
            Ok(())
        }
        ExplainOutput::NotFound { identifier } => {
            eprint!("{}", format_not_found(&identifier));
            std::process::exit(1);
        }
    }
}
