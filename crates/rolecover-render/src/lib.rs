//! Rendering utilities for CI surfaces (Markdown, GitHub annotations, console summary).
//!
//! Renderers take a `RenderableReport` so they stay independent of the report wire format.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod summary;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableDocument, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
pub use summary::render_summary;
