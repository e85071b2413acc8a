//! The reconciler: both passes in sequence, one combined change log.

use crate::defaults::reconcile_defaults;
use crate::error::Result;
use crate::migrate::apply_migrations;
use crate::report::{ChangeRecord, ReconcileOutcome};
use crate::rule::MigrationTable;
use cm_tree::{ConfigTree, ConfigValue};
use tracing::debug;

/// Applies a migration table and a defaults merge to configuration trees.
///
/// The reconciler holds only the rule table; trees are passed per call and
/// returned, so a single reconciler can serve any number of independent
/// configuration files.
#[derive(Debug, Clone)]
pub struct Reconciler {
    table: MigrationTable,
}

impl Reconciler {
    /// Create a reconciler, validating the rule table up front.
    ///
    /// Tables with duplicate sources or chained renames are rejected here
    /// rather than producing order-dependent results later.
    pub fn new(table: MigrationTable) -> Result<Self> {
        table.validate()?;
        Ok(Reconciler { table })
    }

    /// The validated rule table.
    pub fn table(&self) -> &MigrationTable {
        &self.table
    }

    /// Run both passes: migration rules first, defaults merge second.
    ///
    /// The defaults merge must see the fully migrated tree, otherwise a
    /// legacy field's destination would be filled from the defaults before
    /// the user's own value arrives there.
    pub fn reconcile(&self, mut tree: ConfigTree, defaults: &ConfigTree) -> Result<ReconcileOutcome> {
        let mut changes = apply_migrations(&mut tree, &self.table)?;

        for path in reconcile_defaults(&mut tree, defaults) {
            // Paths come from the merged tree's own leaf enumeration, so the
            // lookup cannot miss.
            let value = tree.get(&path).cloned().unwrap_or_else(ConfigValue::null);
            changes.push(ChangeRecord::Added { path, value });
        }

        debug!(
            migrations = changes.iter().filter(|c| c.is_migration()).count(),
            additions = changes.iter().filter(|c| c.is_addition()).count(),
            "reconciliation complete"
        );

        Ok(ReconcileOutcome { tree, changes })
    }
}
