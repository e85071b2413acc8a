//! Error types for confmend's outer layer.

use cm_reconcile::MigrationError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for confmend operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by the persistence and collaborator layer.
///
/// The engine itself favors silent no-ops for "nothing to do" conditions;
/// everything here is a genuine failure the startup sequence must stop on.
#[derive(Error, Debug)]
pub enum CoreError {
    /// File or directory access failed.
    #[error("io error at '{path}': {source}")]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but is not valid YAML for a tree.
    #[error("cannot parse '{path}': {message}")]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// Parser diagnostics.
        message: String,
    },

    /// A tree could not be rendered back to YAML.
    #[error("cannot serialize '{path}': {message}")]
    Serialize {
        /// The intended destination.
        path: PathBuf,
        /// Serializer diagnostics.
        message: String,
    },

    /// The legacy configuration file could not be converted.
    #[error("legacy config conversion failed: {0}")]
    LegacyConversion(String),

    /// The reconciliation engine rejected the tree or the rule table.
    #[error(transparent)]
    Reconcile(#[from] MigrationError),
}

impl CoreError {
    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        CoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable error code for automation (see [`crate::exit_codes`]).
    pub fn code(&self) -> i32 {
        match self {
            CoreError::Io { .. } | CoreError::Parse { .. } | CoreError::Serialize { .. } => 11,
            CoreError::LegacyConversion(_) => 12,
            CoreError::Reconcile(_) => 13,
        }
    }
}
