//! The migration-rule application pass.

use crate::error::{MigrationError, Result};
use crate::report::ChangeRecord;
use crate::rule::{MigrationTable, RuleAction};
use cm_tree::ConfigTree;
use tracing::debug;

/// Apply `table` to `tree` in rule order, returning one [`ChangeRecord`] per
/// matched rule.
///
/// A rule whose `old_path` is absent is skipped silently: on a fresh or
/// already-migrated tree most rules will not match, which is what makes this
/// pass idempotent. A transform failure or a blocked destination write
/// propagates and aborts the whole pass; partially applied rules up to that
/// point remain applied, and the caller is expected to discard the tree.
pub fn apply_migrations(
    tree: &mut ConfigTree,
    table: &MigrationTable,
) -> Result<Vec<ChangeRecord>> {
    let mut changes = Vec::new();

    for rule in table {
        let Some(old_value) = tree.get(&rule.old_path).cloned() else {
            debug!(rule = %rule.old_path, "migration rule does not match, skipping");
            continue;
        };

        match &rule.action {
            RuleAction::Remove => {
                tree.unset(&rule.old_path);
                changes.push(ChangeRecord::Migrated {
                    old_path: rule.old_path.clone(),
                    new_path: None,
                    old_value,
                    new_value: None,
                });
            }
            RuleAction::Move {
                new_path,
                transform,
            } => {
                let new_value = transform.apply(&old_value).map_err(|message| {
                    MigrationError::TransformFailed {
                        path: rule.old_path.clone(),
                        transform: transform.name(),
                        message,
                    }
                })?;
                tree.set(new_path, new_value.clone())?;
                tree.unset(&rule.old_path);
                changes.push(ChangeRecord::Migrated {
                    old_path: rule.old_path.clone(),
                    new_path: Some(new_path.clone()),
                    old_value,
                    new_value: Some(new_value),
                });
            }
        }
    }

    Ok(changes)
}
