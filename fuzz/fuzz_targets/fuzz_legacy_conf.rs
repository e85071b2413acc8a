//! Fuzz target for legacy flat configuration parsing.
//!
//! Tests that `key = value` conversion handles arbitrary input without
//! panicking.

#![no_main]

use cm_core::legacy::parse_flat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Should never panic, only return an error
        let _ = parse_flat(text);
    }
});
