//! Migration rules, transforms, and the rule table.
//!
//! The rule table is plain data: each rule names its source path and an
//! action, and transforms are enum-dispatched named cases rather than opaque
//! function values. This keeps rules forward-iterable, serializable, and
//! unit-testable in isolation.

use crate::error::{MigrationError, Result};
use cm_tree::{ConfigValue, KeyPath, Scalar};
use serde::{Deserialize, Serialize};

/// A pure transformation of a single migrated value.
///
/// Transforms read nothing but the old value, which keeps migrations
/// independently testable and order-insensitive for disjoint paths. A
/// transform applied to a value shape it does not handle fails loudly; the
/// engine propagates that failure uncaught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    /// Carry the value over unchanged.
    Identity,
    /// Logical negation of a boolean (for `disableX` → `x.enabled` renames).
    NegateBool,
    /// Map a boolean to one of two scalars.
    SelectBool {
        /// Value produced for `true`.
        on_true: Scalar,
        /// Value produced for `false`.
        on_false: Scalar,
    },
    /// Render an integer or string with a unit suffix appended.
    FormatWithSuffix {
        /// Suffix appended to the rendered value.
        suffix: String,
    },
}

impl Transform {
    /// Stable name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::NegateBool => "negate_bool",
            Transform::SelectBool { .. } => "select_bool",
            Transform::FormatWithSuffix { .. } => "format_with_suffix",
        }
    }

    /// Apply the transform to `value`.
    pub fn apply(&self, value: &ConfigValue) -> std::result::Result<ConfigValue, String> {
        match self {
            Transform::Identity => Ok(value.clone()),
            Transform::NegateBool => match value.as_bool() {
                Some(b) => Ok(ConfigValue::from(!b)),
                None => Err(format!("expected a boolean, got {:?}", value)),
            },
            Transform::SelectBool { on_true, on_false } => match value.as_bool() {
                Some(true) => Ok(ConfigValue::Scalar(on_true.clone())),
                Some(false) => Ok(ConfigValue::Scalar(on_false.clone())),
                None => Err(format!("expected a boolean, got {:?}", value)),
            },
            Transform::FormatWithSuffix { suffix } => match value {
                ConfigValue::Scalar(Scalar::Int(n)) => {
                    Ok(ConfigValue::from(format!("{}{}", n, suffix)))
                }
                ConfigValue::Scalar(Scalar::String(s)) => {
                    Ok(ConfigValue::from(format!("{}{}", s, suffix)))
                }
                other => Err(format!("expected an integer or string, got {:?}", other)),
            },
        }
    }
}

/// What a matched rule does with the value at its `old_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleAction {
    /// Move the value to `new_path`, transforming it on the way.
    Move {
        /// Destination path; intermediate mappings are created as needed.
        new_path: KeyPath,
        /// Transformation applied to the old value.
        transform: Transform,
    },
    /// Delete the value outright, writing nothing.
    Remove,
}

/// A one-time transformation moving, renaming, or removing a legacy field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRule {
    /// Legacy path this rule consumes. A tree without a value here skips the
    /// rule silently.
    pub old_path: KeyPath,
    /// What to do with the matched value.
    pub action: RuleAction,
}

impl MigrationRule {
    /// A plain rename: move the value unchanged.
    pub fn rename(old_path: KeyPath, new_path: KeyPath) -> Self {
        Self::transform(old_path, new_path, Transform::Identity)
    }

    /// A rename with a value transformation.
    pub fn transform(old_path: KeyPath, new_path: KeyPath, transform: Transform) -> Self {
        MigrationRule {
            old_path,
            action: RuleAction::Move {
                new_path,
                transform,
            },
        }
    }

    /// A removal: delete the value, write nothing.
    pub fn remove(old_path: KeyPath) -> Self {
        MigrationRule {
            old_path,
            action: RuleAction::Remove,
        }
    }

    /// The rule's destination, if it has one.
    pub fn new_path(&self) -> Option<&KeyPath> {
        match &self.action {
            RuleAction::Move { new_path, .. } => Some(new_path),
            RuleAction::Remove => None,
        }
    }
}

/// An ordered sequence of migration rules.
///
/// Order matters only insofar as two rules could target overlapping paths;
/// [`MigrationTable::validate`] rejects such tables, so order affects the
/// change log only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MigrationTable(Vec<MigrationRule>);

impl MigrationTable {
    /// Build a table from rules, preserving order.
    pub fn new(rules: Vec<MigrationRule>) -> Self {
        MigrationTable(rules)
    }

    /// Iterate the rules in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, MigrationRule> {
        self.0.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject tables the engine cannot apply in a single pass:
    /// duplicate sources, and destinations that double as sources
    /// (chained renames, including a rule writing back to its own source).
    pub fn validate(&self) -> Result<()> {
        for (idx, rule) in self.0.iter().enumerate() {
            if self.0[..idx].iter().any(|r| r.old_path == rule.old_path) {
                return Err(MigrationError::DuplicateRule(rule.old_path.clone()));
            }
        }
        for rule in &self.0 {
            if let Some(new_path) = rule.new_path() {
                if let Some(consumer) = self.0.iter().find(|r| r.old_path == *new_path) {
                    return Err(MigrationError::ChainedRename {
                        new_path: new_path.clone(),
                        old_path: consumer.old_path.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MigrationTable {
    type Item = &'a MigrationRule;
    type IntoIter = std::slice::Iter<'a, MigrationRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
