//! Repository adapters: discover and parse Role / ClusterRole documents.
//!
//! This crate is allowed to do filesystem IO. Coverage itself lives in `rolecover-domain`.

#![forbid(unsafe_code)]

mod discover;
mod parse;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use rolecover_types::PolicyRule;

pub use discover::discover_documents;
pub use parse::parse_role_documents;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a role document. **Never panics** on any input.
    pub fn parse_role_yaml(text: &str) -> anyhow::Result<usize> {
        let doc = parse::parse_role_documents(
            Utf8Path::new("fuzz.yaml"),
            text,
            &LoadOptions::default(),
        )?;
        Ok(doc.rules.len())
    }
}

/// Which documents and files the loader accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Accepted `kind` values.
    pub kinds: Vec<String>,
    /// File-name globs applied when a directory is expanded.
    pub include: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            kinds: vec!["Role".to_string(), "ClusterRole".to_string()],
            include: vec!["*.yaml".to_string(), "*.yml".to_string()],
        }
    }
}

impl LoadOptions {
    pub fn accepts_kind(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

/// One entry of a `rules` list: the decoded rule, or why it could not be decoded.
pub type RuleEntry = Result<PolicyRule, String>;

/// Rules read from one file, plus enough metadata to report on them.
#[derive(Clone, Debug, PartialEq)]
pub struct RoleDocument {
    pub path: Utf8PathBuf,
    /// `kind` of the first accepted document in the file.
    pub kind: String,
    pub name: Option<String>,
    /// `metadata.annotations.description`, when present.
    pub description: Option<String>,
    /// Rules of every accepted document in the file, in file order.
    pub rules: Vec<RuleEntry>,
}

/// Read and parse one role file.
pub fn load_role_document(path: &Utf8Path, opts: &LoadOptions) -> anyhow::Result<RoleDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let doc = parse::parse_role_documents(path, &text, opts).with_context(|| format!("parse {path}"))?;
    tracing::debug!(path = %path, kind = %doc.kind, rules = doc.rules.len(), "loaded role document");
    Ok(doc)
}

/// Expand each input: files are kept as given, directories are searched for role files.
pub fn expand_inputs(inputs: &[Utf8PathBuf], opts: &LoadOptions) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut out = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = discover::discover_documents(input, opts)
                .with_context(|| format!("discover role documents in {input}"))?;
            if found.is_empty() {
                tracing::warn!(dir = %input, "no role documents matched");
            }
            out.extend(found);
        } else {
            out.push(input.clone());
        }
    }
    Ok(out)
}

/// Parse many files in parallel. The result order equals the input order.
pub fn load_many(paths: &[Utf8PathBuf], opts: &LoadOptions) -> anyhow::Result<Vec<RoleDocument>> {
    paths
        .par_iter()
        .map(|path| load_role_document(path, opts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn role_yaml(name: &str, verb: &str) -> String {
        format!(
            "kind: ClusterRole\nmetadata:\n  name: {name}\nrules:\n- apiGroups: [\"\"]\n  resources: [\"pods\"]\n  verbs: [\"{verb}\"]\n"
        )
    }

    #[test]
    fn load_many_preserves_input_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let mut paths = Vec::new();
        for (i, name) in ["zeta", "alpha", "mid"].iter().enumerate() {
            let path = root.join(format!("{name}.yaml"));
            std::fs::write(&path, role_yaml(name, &format!("verb{i}"))).expect("write");
            paths.push(path);
        }

        let docs = load_many(&paths, &LoadOptions::default()).expect("load");
        let names: Vec<Option<&str>> = docs.iter().map(|d| d.name.as_deref()).collect();
        assert_eq!(names, vec![Some("zeta"), Some("alpha"), Some("mid")]);
    }

    #[test]
    fn load_many_reports_the_failing_file() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let good = root.join("good.yaml");
        std::fs::write(&good, role_yaml("good", "get")).expect("write");
        let missing = root.join("missing.yaml");

        let err = load_many(&[good, missing], &LoadOptions::default()).expect_err("missing file");
        assert!(format!("{err:#}").contains("missing.yaml"));
    }

    #[test]
    fn malformed_rule_does_not_fail_the_load() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let typo = root.join("typo.yaml");
        std::fs::write(
            &typo,
            "kind: Role\nmetadata:\n  name: typo\nrules:\n- apiGroups: [\"\"]\n  resources: [\"pods\"]\n  verb: [\"get\"]\n",
        )
        .expect("write");
        let good = root.join("good.yaml");
        std::fs::write(&good, role_yaml("good", "get")).expect("write");

        let docs = load_many(&[good, typo], &LoadOptions::default()).expect("load");
        assert_eq!(docs.len(), 2);
        assert!(docs[0].rules.iter().all(Result::is_ok));
        assert!(docs[1].rules[0].is_err());
    }

    #[test]
    fn expand_inputs_keeps_files_and_walks_directories() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        let dir = root.join("roles");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("b.yaml"), role_yaml("b", "get")).expect("write");
        std::fs::write(dir.join("a.yml"), role_yaml("a", "get")).expect("write");
        std::fs::write(dir.join("notes.txt"), "not a role").expect("write");
        let single = root.join("single.yaml");
        std::fs::write(&single, role_yaml("single", "get")).expect("write");

        let expanded =
            expand_inputs(&[single.clone(), dir.clone()], &LoadOptions::default()).expect("expand");
        assert_eq!(expanded, vec![single, dir.join("a.yml"), dir.join("b.yaml")]);
    }

    proptest! {
        #[test]
        fn fuzz_parser_never_panics(input in ".*") {
            let _ = fuzz::parse_role_yaml(&input);
        }
    }
}
