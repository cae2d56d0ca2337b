//! Fuzz target for role document parsing.
//!
//! Goal: The YAML loader should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_role_yaml
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = rolecover_repo::fuzz::parse_role_yaml(text);
    }
});
