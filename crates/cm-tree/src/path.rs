//! Key paths and path-addressed tree operations.
//!
//! A `KeyPath` addresses a leaf or subtree inside a `ConfigTree` via an
//! ordered list of field names, conventionally rendered as a dot-separated
//! string (`backups.chat.enabled`). Path semantics are deliberately explicit:
//!
//! - `get`/`contains` return nothing when any segment is missing or a
//!   non-mapping blocks the descent; they never fail.
//! - `set` creates missing intermediate mappings but refuses to replace an
//!   existing scalar or sequence with a mapping.
//! - `unset` removes the final segment only; ancestor mappings emptied by the
//!   removal are left in place.

use crate::error::{Result, TreeError};
use crate::value::{ConfigTree, ConfigValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of field-name segments addressing into a tree.
///
/// Two paths are equal iff their segment sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Parse a dotted path string. Empty paths and empty segments are
    /// rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() || path.split('.').any(|segment| segment.is_empty()) {
            return Err(TreeError::InvalidPath(path.to_string()));
        }
        Ok(KeyPath(path.split('.').map(str::to_string).collect()))
    }

    /// Build a path from pre-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(TreeError::InvalidPath(segments.join(".")));
        }
        Ok(KeyPath(segments))
    }

    /// The path's segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// A new path with one more segment appended.
    pub fn child(&self, segment: &str) -> KeyPath {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        KeyPath(segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        KeyPath::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = TreeError;

    fn try_from(s: String) -> Result<Self> {
        KeyPath::parse(&s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> String {
        path.to_string()
    }
}

impl ConfigTree {
    /// Get the value at `path`, if every segment resolves through mappings.
    pub fn get(&self, path: &KeyPath) -> Option<&ConfigValue> {
        let (last, ancestors) = path.segments().split_last()?;
        let mut map = self.as_map();
        for segment in ancestors {
            map = map.get(segment)?.as_mapping()?;
        }
        map.get(last)
    }

    /// Whether a value (leaf or subtree) exists at `path`.
    pub fn contains(&self, path: &KeyPath) -> bool {
        self.get(path).is_some()
    }

    /// Write `value` at `path`, creating intermediate mappings as needed and
    /// overwriting any prior value at the final segment.
    ///
    /// Fails with [`TreeError::NotAMapping`] when an existing scalar or
    /// sequence blocks an intermediate segment; the tree is left unchanged in
    /// that case.
    pub fn set(&mut self, path: &KeyPath, value: ConfigValue) -> Result<()> {
        let (last, ancestors) = path
            .segments()
            .split_last()
            .ok_or_else(|| TreeError::InvalidPath(String::new()))?;

        let mut map = self.as_map_mut();
        for (depth, segment) in ancestors.iter().enumerate() {
            map = map
                .entry(segment.clone())
                .or_insert_with(|| ConfigValue::Mapping(Default::default()))
                .as_mapping_mut()
                .ok_or_else(|| TreeError::NotAMapping {
                    path: ancestors[..=depth].join("."),
                })?;
        }
        map.insert(last.clone(), value);
        Ok(())
    }

    /// Remove and return the value at `path`. Missing paths are a silent
    /// no-op returning `None`. Ancestor mappings emptied by the removal are
    /// kept.
    pub fn unset(&mut self, path: &KeyPath) -> Option<ConfigValue> {
        let (last, ancestors) = path.segments().split_last()?;
        let mut map = self.as_map_mut();
        for segment in ancestors {
            map = map.get_mut(segment)?.as_mapping_mut()?;
        }
        map.shift_remove(last)
    }

    /// Enumerate every leaf path in the tree, depth-first in insertion order.
    ///
    /// A leaf is a scalar- or sequence-valued field; sequences are never
    /// descended into. Empty mappings contribute no leaf paths.
    pub fn leaf_paths(&self) -> Vec<KeyPath> {
        fn walk(map: &crate::value::ConfigMap, prefix: &[String], out: &mut Vec<KeyPath>) {
            for (key, value) in map {
                let mut segments = prefix.to_vec();
                segments.push(key.clone());
                match value {
                    ConfigValue::Mapping(inner) => walk(inner, &segments, out),
                    _ => out.push(KeyPath(segments)),
                }
            }
        }

        let mut out = Vec::new();
        walk(self.as_map(), &[], &mut out);
        out
    }
}
