//! Error types for tree and path operations.

use thiserror::Error;

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur while addressing into a configuration tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A write tried to descend through a value that is not a mapping.
    ///
    /// `set` creates missing intermediate mappings, but it never silently
    /// replaces an existing scalar or sequence with a mapping.
    #[error("cannot descend into non-mapping value at '{path}'")]
    NotAMapping {
        /// Dotted path of the blocking value.
        path: String,
    },

    /// A key path was empty or contained an empty segment.
    #[error("invalid key path '{0}': paths are non-empty dot-separated segments")]
    InvalidPath(String),
}
