//! Tagged configuration value model.
//!
//! A configuration tree is a mapping from field names to values, where a value
//! is a scalar, a sequence, or a nested mapping. The variants are explicit so
//! recursion over trees is exhaustive and compiler-checked rather than relying
//! on runtime type inspection.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An insertion-ordered mapping of field names to values.
///
/// Insertion order is irrelevant to reconciliation semantics but is preserved
/// so repeated serialization of the same tree is stable.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A scalar configuration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer. Deserialization prefers integers over floats.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

/// A single node in a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A scalar leaf.
    Scalar(Scalar),
    /// A sequence leaf. Sequences are atomic: reconciliation never descends
    /// into them, even when their elements are mappings.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(ConfigMap),
}

impl fmt::Display for ConfigValue {
    /// Compact rendering for change logs: scalars verbatim, containers by
    /// size.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Scalar(s) => write!(f, "{}", s),
            ConfigValue::Sequence(items) => write!(f, "[{} items]", items.len()),
            ConfigValue::Mapping(map) => write!(f, "{{{} fields}}", map.len()),
        }
    }
}

impl ConfigValue {
    /// Whether this value is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, ConfigValue::Mapping(_))
    }

    /// Whether this value is a leaf (scalar or sequence).
    pub fn is_leaf(&self) -> bool {
        !self.is_mapping()
    }

    /// Borrow the inner mapping, if this value is one.
    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrow the inner mapping, if this value is one.
    pub fn as_mapping_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the inner boolean, if this value is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Explicit null scalar.
    pub fn null() -> Self {
        ConfigValue::Scalar(Scalar::Null)
    }
}

impl From<Scalar> for ConfigValue {
    fn from(scalar: Scalar) -> Self {
        ConfigValue::Scalar(scalar)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Scalar(Scalar::Int(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Scalar(Scalar::Float(n))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Scalar(Scalar::String(s))
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

/// A complete configuration tree: an ordered mapping at the root.
///
/// The tree is owned by the caller for the duration of a reconciliation call;
/// no engine-held state persists between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigTree(ConfigMap);

impl ConfigTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        ConfigTree(ConfigMap::new())
    }

    /// Whether the tree has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the root mapping.
    pub fn as_map(&self) -> &ConfigMap {
        &self.0
    }

    /// Mutably borrow the root mapping.
    pub fn as_map_mut(&mut self) -> &mut ConfigMap {
        &mut self.0
    }

    /// Consume the tree, returning the root mapping.
    pub fn into_map(self) -> ConfigMap {
        self.0
    }
}

impl From<ConfigMap> for ConfigTree {
    fn from(map: ConfigMap) -> Self {
        ConfigTree(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_yaml_round_trip() {
        let tree: ConfigTree = serde_yaml::from_str(
            "enabled: true\ncount: 3\nratio: 0.5\nname: demo\nnothing: null\n",
        )
        .unwrap();

        assert_eq!(tree.as_map()["enabled"], ConfigValue::from(true));
        assert_eq!(tree.as_map()["count"], ConfigValue::from(3));
        assert_eq!(tree.as_map()["ratio"], ConfigValue::from(0.5));
        assert_eq!(tree.as_map()["name"], ConfigValue::from("demo"));
        assert_eq!(tree.as_map()["nothing"], ConfigValue::null());

        let yaml = serde_yaml::to_string(&tree).unwrap();
        let back: ConfigTree = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(tree, back);
    }

    #[test]
    fn test_nested_and_sequence_values() {
        let tree: ConfigTree =
            serde_yaml::from_str("outer:\n  inner: 1\nlist:\n  - a\n  - b\n").unwrap();

        assert!(tree.as_map()["outer"].is_mapping());
        assert!(tree.as_map()["list"].is_leaf());
        match &tree.as_map()["list"] {
            ConfigValue::Sequence(items) => assert_eq!(items.len(), 2),
            other => panic!("expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let tree: ConfigTree = serde_yaml::from_str("zeta: 1\nalpha: 2\nmiddle: 3\n").unwrap();
        let keys: Vec<&String> = tree.as_map().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "middle"]);
    }

    #[test]
    fn test_integer_preferred_over_float() {
        let tree: ConfigTree = serde_yaml::from_str("n: 42\n").unwrap();
        assert_eq!(tree.as_map()["n"], ConfigValue::from(42));
    }
}
