//! The defaults-merge pass: recursive deep-merge with user precedence.

use cm_tree::{ConfigMap, ConfigTree, ConfigValue, KeyPath};
use indexmap::map::Entry;
use std::collections::HashSet;

/// Merge `defaults` into `tree`, filling in every path present in the default
/// tree but absent from the user tree. Returns the leaf paths that are newly
/// present, in depth-first discovery order.
///
/// Precedence is strictly user-wins: configuration files are hand-edited, so
/// any field the user has touched, even a sub-field, is never replaced. Only
/// genuinely new sub-structure appears:
///
/// - a field missing from the user tree is copied from the defaults wholesale
/// - two nested mappings are merged recursively
/// - in every other case (either side scalar or sequence) the user value
///   stands; sequences are atomic, so list contents are never aligned or
///   merged
///
/// The pass never fails: every value shape falls through to "leaf, user
/// wins". Running it twice reports no additions the second time.
pub fn reconcile_defaults(tree: &mut ConfigTree, defaults: &ConfigTree) -> Vec<KeyPath> {
    let before: HashSet<KeyPath> = tree.leaf_paths().into_iter().collect();

    merge_map(tree.as_map_mut(), defaults.as_map());

    tree.leaf_paths()
        .into_iter()
        .filter(|path| !before.contains(path))
        .collect()
}

fn merge_map(tree: &mut ConfigMap, defaults: &ConfigMap) {
    for (key, default_value) in defaults {
        match tree.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(default_value.clone());
            }
            Entry::Occupied(mut slot) => {
                if let (ConfigValue::Mapping(user), ConfigValue::Mapping(default)) =
                    (slot.get_mut(), default_value)
                {
                    merge_map(user, default);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> ConfigTree {
        serde_yaml::from_str(yaml).expect("parse fixture tree")
    }

    fn paths(added: &[KeyPath]) -> Vec<String> {
        added.iter().map(KeyPath::to_string).collect()
    }

    #[test]
    fn test_merge_precedence() {
        let mut user = tree("a:\n  b: 1\n");
        let defaults = tree("a:\n  b: 2\n  c: 3\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert_eq!(user, tree("a:\n  b: 1\n  c: 3\n"));
        assert_eq!(paths(&added), ["a.c"]);
    }

    #[test]
    fn test_sequences_are_atomic() {
        let mut user = tree("list: [1, 2]\n");
        let defaults = tree("list: [1, 2, 3]\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert_eq!(user, tree("list: [1, 2]\n"));
        assert!(added.is_empty());
    }

    #[test]
    fn test_missing_subtree_copied_wholesale() {
        let mut user = tree("kept: true\n");
        let defaults = tree("backups:\n  chat:\n    enabled: true\n    maxTotalBackups: 5\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert_eq!(
            paths(&added),
            ["backups.chat.enabled", "backups.chat.maxTotalBackups"]
        );
        assert_eq!(
            user.get(&"backups.chat.enabled".parse().unwrap()),
            Some(&ConfigValue::from(true))
        );
    }

    #[test]
    fn test_type_conflict_keeps_user_value() {
        // User turned a section into a scalar; the default subtree must not
        // overwrite it, and none of its leaves count as additions.
        let mut user = tree("thumbnails: off\n");
        let defaults = tree("thumbnails:\n  enabled: true\n  quality: 95\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert_eq!(user, tree("thumbnails: off\n"));
        assert!(added.is_empty());
    }

    #[test]
    fn test_user_mapping_over_default_scalar() {
        let mut user = tree("logging:\n  minLogLevel: 2\n");
        let defaults = tree("logging: default\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert_eq!(user, tree("logging:\n  minLogLevel: 2\n"));
        assert!(added.is_empty());
    }

    #[test]
    fn test_additions_follow_default_field_order() {
        let mut user = tree("middle: 1\n");
        let defaults = tree("zeta: 1\nmiddle: 2\nalpha:\n  one: 1\n  two: 2\n");

        let added = reconcile_defaults(&mut user, &defaults);

        // New keys append after existing ones, depth-first within subtrees.
        assert_eq!(paths(&added), ["zeta", "alpha.one", "alpha.two"]);
    }

    #[test]
    fn test_second_run_adds_nothing() {
        let mut user = tree("a:\n  b: 1\n");
        let defaults = tree("a:\n  b: 2\n  c: 3\nlist: [1]\n");

        reconcile_defaults(&mut user, &defaults);
        let merged = user.clone();
        let again = reconcile_defaults(&mut user, &defaults);

        assert!(again.is_empty());
        assert_eq!(user, merged);
    }

    #[test]
    fn test_empty_default_mapping_adds_no_leaves() {
        let mut user = tree("a: 1\n");
        let defaults = tree("a: 1\nplaceholder: {}\n");

        let added = reconcile_defaults(&mut user, &defaults);

        assert!(added.is_empty());
        assert!(user.contains(&"placeholder".parse().unwrap()));
    }
}
