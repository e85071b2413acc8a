//! Change records and the reconciliation outcome.

use cm_tree::{ConfigTree, ConfigValue, KeyPath};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One auditable change made during reconciliation.
///
/// The combined change log is the ordered concatenation of `Migrated` records
/// (in rule-table order) followed by `Added` records (in the order new leaf
/// paths were discovered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeRecord {
    /// A migration rule matched: the value moved, was transformed, or was
    /// removed (`new_path`/`new_value` absent).
    Migrated {
        /// Legacy path the value was read from.
        old_path: KeyPath,
        /// Destination path, absent for removals.
        #[serde(skip_serializing_if = "Option::is_none")]
        new_path: Option<KeyPath>,
        /// The value found at `old_path`.
        old_value: ConfigValue,
        /// The transformed value written at `new_path`, absent for removals.
        #[serde(skip_serializing_if = "Option::is_none")]
        new_value: Option<ConfigValue>,
    },
    /// A leaf path present only in the default tree was filled in.
    Added {
        /// The newly present leaf path.
        path: KeyPath,
        /// The default value copied in.
        value: ConfigValue,
    },
}

impl ChangeRecord {
    /// Whether this record is a migration.
    pub fn is_migration(&self) -> bool {
        matches!(self, ChangeRecord::Migrated { .. })
    }

    /// Whether this record is a defaults addition.
    pub fn is_addition(&self) -> bool {
        matches!(self, ChangeRecord::Added { .. })
    }
}

impl fmt::Display for ChangeRecord {
    /// One-line rendering for log output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeRecord::Migrated {
                old_path,
                new_path: Some(new_path),
                new_value: Some(new_value),
                ..
            } => write!(f, "migrated {} -> {} = {}", old_path, new_path, new_value),
            ChangeRecord::Migrated { old_path, .. } => write!(f, "removed {}", old_path),
            ChangeRecord::Added { path, value } => write!(f, "added {} = {}", path, value),
        }
    }
}

/// The result of a full reconciliation: the reconciled tree plus the ordered
/// change log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileOutcome {
    /// The migrated, defaults-filled tree.
    pub tree: ConfigTree,
    /// Every change made, migrations first, additions after.
    pub changes: Vec<ChangeRecord>,
}

impl ReconcileOutcome {
    /// Whether reconciliation changed nothing.
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }

    /// The migration records, in rule-table order.
    pub fn migrations(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(|c| c.is_migration())
    }

    /// The addition records, in discovery order.
    pub fn additions(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(|c| c.is_addition())
    }
}
