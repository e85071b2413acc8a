//! Run orchestration: the full startup maintenance sequence.
//!
//! Steps, in order: legacy conversion, asset synchronization, tree
//! reconciliation, persistence. Reconciliation must see the converted tree,
//! and the defaults merge must see the fully migrated tree, so the order is
//! fixed.

use crate::assets::{self, SyncAction};
use crate::error::Result;
use crate::legacy::{self, LegacyOutcome};
use crate::rules;
use crate::store;
use chrono::{DateTime, Utc};
use cm_reconcile::{ChangeRecord, Reconciler};
use cm_tree::ConfigTree;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The hierarchical configuration file name.
pub const CONFIG_FILE: &str = "config.yaml";

/// Options for one maintenance run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Application data root containing the user's configuration.
    pub data_root: PathBuf,
    /// Directory of packaged defaults.
    pub defaults_dir: PathBuf,
    /// Report changes without writing anything.
    pub dry_run: bool,
}

impl RunOptions {
    /// Build options for `data_root`, defaulting the packaged-defaults
    /// directory to `<data_root>/default`.
    pub fn new(data_root: impl Into<PathBuf>, defaults_dir: Option<PathBuf>) -> Self {
        let data_root = data_root.into();
        let defaults_dir = defaults_dir.unwrap_or_else(|| data_root.join("default"));
        RunOptions {
            data_root,
            defaults_dir,
            dry_run: false,
        }
    }

    /// Turn this into a dry run.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    fn config_path(&self) -> PathBuf {
        self.data_root.join(CONFIG_FILE)
    }
}

/// Everything one run did (or, for a dry run, would do).
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// When the run happened.
    pub timestamp: DateTime<Utc>,
    /// Outcome of the legacy conversion step.
    pub legacy: LegacyOutcome,
    /// Default assets created, merged, or refreshed.
    pub synced: Vec<SyncAction>,
    /// Reconciliation changes, migrations first, additions after.
    pub changes: Vec<ChangeRecord>,
    /// Whether the configuration file was rewritten.
    pub wrote_config: bool,
}

impl RunReport {
    /// Whether the run found nothing to do.
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
            && self.synced.is_empty()
            && matches!(
                self.legacy,
                LegacyOutcome::NotPresent | LegacyOutcome::SkippedBothExist
            )
    }
}

/// Execute the full maintenance sequence for one data root.
pub fn run(opts: &RunOptions) -> Result<RunReport> {
    let config_path = opts.config_path();

    let legacy = legacy::convert_legacy(&opts.data_root, &config_path, opts.dry_run)?;

    let synced = if opts.dry_run {
        Vec::new()
    } else {
        assets::sync_assets(&assets::default_assets(&opts.data_root, &opts.defaults_dir))
    };

    let defaults = store::load_tree(&opts.defaults_dir.join(CONFIG_FILE))?;
    let user = load_user_tree(&config_path)?;

    let reconciler = Reconciler::new(rules::reference_table())?;
    let outcome = reconciler.reconcile(user, &defaults)?;

    for change in &outcome.changes {
        info!("{}", change);
    }

    let wrote_config = if !outcome.is_clean() && !opts.dry_run {
        store::save_tree(&config_path, &outcome.tree)?;
        true
    } else {
        debug!(dry_run = opts.dry_run, "configuration left untouched");
        false
    };

    Ok(RunReport {
        timestamp: Utc::now(),
        legacy,
        synced,
        changes: outcome.changes,
        wrote_config,
    })
}

/// Load the user tree, treating a missing file as empty. A dry run against a
/// fresh data root then reports every default as pending.
fn load_user_tree(config_path: &Path) -> Result<ConfigTree> {
    if config_path.exists() {
        store::load_tree(config_path)
    } else {
        Ok(ConfigTree::new())
    }
}
