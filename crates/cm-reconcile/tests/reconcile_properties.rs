//! Property tests for the reconciliation invariants.
//!
//! Generates arbitrary nested trees and checks the contracts that must hold
//! for any input: idempotency, no-loss, defaults completeness, and user
//! precedence. Floats are excluded from the generators so value equality is
//! exact.

use cm_reconcile::{apply_migrations, reconcile_defaults, MigrationRule, MigrationTable};
use cm_tree::{ConfigMap, ConfigTree, ConfigValue, KeyPath, Scalar};
use proptest::prelude::*;

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Int),
        "[a-z]{0,8}".prop_map(Scalar::String),
    ]
}

fn arb_value() -> impl Strategy<Value = ConfigValue> {
    let leaf = prop_oneof![
        arb_scalar().prop_map(ConfigValue::Scalar),
        proptest::collection::vec(arb_scalar().prop_map(ConfigValue::Scalar), 0..3)
            .prop_map(ConfigValue::Sequence),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        proptest::collection::vec(("[a-z]{1,6}", inner), 0..4)
            .prop_map(|entries| ConfigValue::Mapping(entries.into_iter().collect()))
    })
}

fn arb_tree() -> impl Strategy<Value = ConfigTree> {
    proptest::collection::vec(("[a-z]{1,6}", arb_value()), 0..4)
        .prop_map(|entries| ConfigTree::from(entries.into_iter().collect::<ConfigMap>()))
}

/// Rules over the generator's key alphabet. Destinations live under
/// "migrated", which is longer than any generated segment, so no generated
/// value can block the writes.
fn arb_table() -> impl Strategy<Value = MigrationTable> {
    proptest::collection::vec("[a-z]{1,6}", 0..4).prop_map(|keys| {
        let rules = keys
            .into_iter()
            .enumerate()
            .filter_map(|(idx, key)| {
                let old: KeyPath = key.parse().ok()?;
                let new: KeyPath = format!("migrated.slot{}", idx).parse().ok()?;
                Some(if idx % 3 == 0 {
                    MigrationRule::remove(old)
                } else {
                    MigrationRule::rename(old, new)
                })
            })
            .collect();
        MigrationTable::new(rules)
    })
}

proptest! {
    #[test]
    fn prop_defaults_merge_idempotent(mut tree in arb_tree(), defaults in arb_tree()) {
        reconcile_defaults(&mut tree, &defaults);
        let merged = tree.clone();
        let again = reconcile_defaults(&mut tree, &defaults);

        prop_assert!(again.is_empty());
        prop_assert_eq!(tree, merged);
    }

    #[test]
    fn prop_defaults_completeness(mut tree in arb_tree(), defaults in arb_tree()) {
        reconcile_defaults(&mut tree, &defaults);
        for leaf in defaults.leaf_paths() {
            prop_assert!(tree.contains(&leaf), "default leaf {} missing", leaf);
        }
    }

    #[test]
    fn prop_user_values_never_replaced(tree in arb_tree(), defaults in arb_tree()) {
        let original = tree.clone();
        let mut merged = tree;
        reconcile_defaults(&mut merged, &defaults);

        for leaf in original.leaf_paths() {
            prop_assert_eq!(
                merged.get(&leaf),
                original.get(&leaf),
                "user value at {} changed",
                leaf
            );
        }
    }

    #[test]
    fn prop_additions_are_exactly_the_new_leaves(tree in arb_tree(), defaults in arb_tree()) {
        let before = tree.leaf_paths();
        let mut merged = tree;
        let added = reconcile_defaults(&mut merged, &defaults);

        for path in &added {
            prop_assert!(!before.contains(path));
            prop_assert!(merged.contains(path));
        }
    }

    #[test]
    fn prop_migration_pass_idempotent(mut tree in arb_tree(), table in arb_table()) {
        // Duplicate generated keys can collide; only valid tables are in scope.
        prop_assume!(table.validate().is_ok());

        if apply_migrations(&mut tree, &table).is_err() {
            // A generated value blocked a destination write; out of scope here.
            return Ok(());
        }
        let migrated = tree.clone();
        let second = apply_migrations(&mut tree, &table).expect("second pass cannot fail");

        prop_assert!(second.is_empty());
        prop_assert_eq!(tree, migrated);
    }

    #[test]
    fn prop_matched_old_paths_absent(mut tree in arb_tree(), table in arb_table()) {
        prop_assume!(table.validate().is_ok());

        let matched: Vec<KeyPath> = table
            .iter()
            .filter(|rule| tree.contains(&rule.old_path))
            .map(|rule| rule.old_path.clone())
            .collect();

        if apply_migrations(&mut tree, &table).is_ok() {
            for old in matched {
                prop_assert!(!tree.contains(&old), "old path {} survived", old);
            }
        }
    }
}
