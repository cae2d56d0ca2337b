//! Fuzz target for the JSON request boundary.
//!
//! Goal: `run_validate` never panics, and every response is exactly one of
//! covered, not covered with a violation, or an error with a kind.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_validate_request
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use rolecover_domain::EffectiveConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let output = rolecover_app::run_validate(text, &EffectiveConfig::default());
    let resp = output.response;

    if resp.covers {
        assert!(resp.error.is_none() && resp.violation.is_none());
        assert_eq!(output.exit_code, rolecover_app::EXIT_EVALUATED);
    } else if resp.is_error() {
        assert!(resp.error.is_some() && resp.violation.is_none());
        assert_eq!(output.exit_code, rolecover_app::EXIT_REJECTED_INPUT);
    } else {
        assert!(resp.violation.is_some() && resp.explanation.is_some());
        assert_eq!(output.exit_code, rolecover_app::EXIT_EVALUATED);
    }
});
