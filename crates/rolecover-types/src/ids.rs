//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_RBAC_COVERAGE: &str = "rbac.coverage";

// Codes: rbac.coverage
pub const CODE_API_GROUPS_NOT_COVERED: &str = "api_groups_not_covered";
pub const CODE_RESOURCES_NOT_COVERED: &str = "resources_not_covered";
pub const CODE_VERBS_NOT_COVERED: &str = "verbs_not_covered";
pub const CODE_RESOURCE_NAMES_NOT_COVERED: &str = "resource_names_not_covered";
pub const CODE_NO_REFERENCE_RULES: &str = "no_reference_rules";

// Input-level
pub const CHECK_INPUT_STRUCTURAL: &str = "input.structural";
pub const CODE_STRUCTURAL_ERROR: &str = "structural_error";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
