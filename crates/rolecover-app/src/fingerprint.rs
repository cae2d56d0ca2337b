use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - document path
/// - rule index (if present)
/// - axis (if present)
pub fn fingerprint_for_rule(
    check_id: &str,
    code: &str,
    path: &str,
    rule_index: Option<u32>,
    axis: Option<&str>,
) -> String {
    let rule = rule_index.map(|i| i.to_string()).unwrap_or_default();
    let canonical = [check_id, code, path, rule.as_str(), axis.unwrap_or("")].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
