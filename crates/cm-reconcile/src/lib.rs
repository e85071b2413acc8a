//! Configuration reconciliation engine.
//!
//! Reconciles a user's persisted configuration tree with an application's
//! evolving configuration schema in two passes, applied in sequence:
//!
//! 1. **Migration rules**: an ordered table of rename/transform/remove rules
//!    moves legacy fields to their current locations.
//! 2. **Defaults merge**: a recursive deep-merge fills in every path present
//!    in the packaged default tree but absent from the user tree. Existing
//!    user values always win.
//!
//! Both passes are idempotent: running either pass on its own output reports
//! no further changes. The engine is pure in-memory tree manipulation; the
//! caller owns loading and persisting the trees.
//!
//! # Example
//!
//! ```
//! use cm_reconcile::{MigrationRule, MigrationTable, Reconciler, Transform};
//! use cm_tree::ConfigTree;
//!
//! let table = MigrationTable::new(vec![MigrationRule::transform(
//!     "disableThumbnails".parse().unwrap(),
//!     "thumbnails.enabled".parse().unwrap(),
//!     Transform::NegateBool,
//! )]);
//! let reconciler = Reconciler::new(table).unwrap();
//!
//! let user: ConfigTree = serde_yaml::from_str("disableThumbnails: true").unwrap();
//! let defaults: ConfigTree = serde_yaml::from_str("thumbnails:\n  enabled: true").unwrap();
//!
//! let outcome = reconciler.reconcile(user, &defaults).unwrap();
//! assert_eq!(outcome.changes.len(), 1);
//! ```

pub mod defaults;
pub mod engine;
pub mod error;
pub mod migrate;
pub mod report;
pub mod rule;

pub use defaults::reconcile_defaults;
pub use engine::Reconciler;
pub use error::{MigrationError, Result};
pub use migrate::apply_migrations;
pub use report::{ChangeRecord, ReconcileOutcome};
pub use rule::{MigrationRule, MigrationTable, RuleAction, Transform};
