//! Fuzz target for YAML tree parsing and the defaults merge.
//!
//! Parses two arbitrary YAML documents as configuration trees and merges
//! them; the merge must be panic-free and idempotent for any shapes.

#![no_main]

use cm_reconcile::reconcile_defaults;
use cm_tree::ConfigTree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((user_doc, defaults_doc)) = text.split_once("\n---\n") else {
        return;
    };
    let (Ok(mut user), Ok(defaults)) = (
        serde_yaml::from_str::<ConfigTree>(user_doc),
        serde_yaml::from_str::<ConfigTree>(defaults_doc),
    ) else {
        return;
    };

    reconcile_defaults(&mut user, &defaults);
    let merged = user.clone();
    let again = reconcile_defaults(&mut user, &defaults);
    assert!(again.is_empty());
    assert_eq!(user, merged);
});
