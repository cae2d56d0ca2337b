use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::LoadOptions;

/// Find role files under `dir` whose file name matches one of `opts.include`.
///
/// The walk is recursive and the result is sorted, so the order never depends
/// on filesystem traversal.
pub fn discover_documents(dir: &Utf8Path, opts: &LoadOptions) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let include = build_globset(&opts.include).context("compile include globset")?;

    let mut out: Vec<Utf8PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| pathbuf_to_utf8(e.path().to_path_buf()))
        .filter(|abs| {
            let rel = abs.strip_prefix(dir).unwrap_or(abs).as_str().replace('\\', "/");
            let name = abs.file_name().unwrap_or("");
            include.is_match(name) || include.is_match(&rel)
        })
        .collect();

    out.sort();
    out.dedup();
    Ok(out)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for p in patterns {
        b.add(Glob::new(p)?);
    }
    Ok(b.build()?)
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
