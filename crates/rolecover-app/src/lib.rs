//! Use case orchestration for rolecover.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings and render layers. It stays thin and delegates the heavy lifting.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod config;
mod explain;
mod fingerprint;
mod render;
mod report;
mod validate;

pub use check::{run_check, verdict_exit_code, CheckInput, CheckOutput};
pub use config::load_config;
pub use explain::{
    format_explanation, format_not_found, run_explain, ExplainOutput, Topic, TopicKind,
};
pub use fingerprint::fingerprint_for_rule;
pub use render::{render_annotations, render_markdown, render_summary};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use validate::{
    reject_input, run_validate, ValidateOutput, EXIT_EVALUATED, EXIT_REJECTED_INPUT,
};
