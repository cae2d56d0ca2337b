//! Render use cases: markdown, GitHub annotations and console summaries from reports.

use rolecover_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    rolecover_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    rolecover_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_summary(report: &RenderableReport) -> String {
    rolecover_render::render_summary(report)
}
