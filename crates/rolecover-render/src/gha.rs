use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},title={check_id}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let check_id = f.check_id.as_deref().unwrap_or("rolecover");
        let mut meta = String::new();
        let mut prefix = String::new();
        if let Some(loc) = &f.location {
            meta.push_str(&format!("file={},", escape_property(&loc.path)));
            if let Some(rule) = loc.rule {
                prefix = format!("rules[{rule}] ");
            }
        }
        meta.push_str(&format!("title={}", escape_property(check_id)));

        let message = escape_data(&format!("{}[{}] {}", prefix, f.code, f.message));
        out.push(format!("::{} {}::{}", level, meta, message));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
