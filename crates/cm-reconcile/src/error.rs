//! Error types for the reconciliation engine.

use cm_tree::{KeyPath, TreeError};
use thiserror::Error;

/// Result type for reconciliation operations.
pub type Result<T> = std::result::Result<T, MigrationError>;

/// Errors that can occur while applying a migration table.
///
/// A rule whose `old_path` is absent from the tree is a silent skip, never an
/// error. Everything here is a configuration-authoring bug: the caller is
/// expected to treat it as fatal and leave the raw file for a human to fix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    /// A transform was applied to a value shape it cannot handle.
    #[error("transform '{transform}' failed at '{path}': {message}")]
    TransformFailed {
        /// Path of the offending value.
        path: KeyPath,
        /// Name of the transform that failed.
        transform: &'static str,
        /// What the transform found instead of what it expected.
        message: String,
    },

    /// Writing a rule's destination hit a non-mapping intermediate value.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Two rules in the same table share an `old_path`.
    #[error("duplicate migration rule for '{0}'")]
    DuplicateRule(KeyPath),

    /// One rule's destination is another rule's source. Chained renames need
    /// an ordering guarantee the engine does not provide, so the table is
    /// rejected outright.
    #[error("chained rename: '{new_path}' is also the source of the rule for '{old_path}'")]
    ChainedRename {
        /// The destination that doubles as a source.
        new_path: KeyPath,
        /// The rule consuming that destination.
        old_path: KeyPath,
    },
}
