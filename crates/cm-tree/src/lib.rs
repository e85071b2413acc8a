//! Hierarchical configuration tree model for confmend.
//!
//! This crate provides:
//! - A tagged value type (`Scalar` / `Sequence` / `Mapping`) for hierarchical
//!   configuration data, with order-preserving mappings for stable serialization
//! - `KeyPath`, a dotted-path addressing mechanism for fields inside a tree
//! - Path utilities on `ConfigTree`: get, set, unset, contains, leaf enumeration
//!
//! The tree is deliberately format-agnostic: `serde_yaml`, `serde_json`, or any
//! other self-describing serde format round-trips a `ConfigTree` directly.
//!
//! # Example
//!
//! ```
//! use cm_tree::{ConfigTree, ConfigValue, KeyPath};
//!
//! let mut tree = ConfigTree::new();
//! let path: KeyPath = "thumbnails.enabled".parse().unwrap();
//! tree.set(&path, ConfigValue::from(true)).unwrap();
//! assert!(tree.contains(&path));
//! ```

pub mod error;
pub mod path;
pub mod value;

pub use error::{Result, TreeError};
pub use path::KeyPath;
pub use value::{ConfigMap, ConfigTree, ConfigValue, Scalar};
