//! Idempotent synchronization of packaged default assets.
//!
//! Three flavors, matching how shipped defaults reach a runtime location:
//! - `File`: copy once if the target does not exist yet
//! - `Directory`: merge recursively, never overwriting existing files
//! - `ChecksumDir`: flat directory of binary assets, refreshed whenever the
//!   SHA-256 of source and target differ
//!
//! Synchronization is independent of tree reconciliation and failure of one
//! item never blocks the others: per-item errors are logged and skipped.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// How a packaged default item is synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Single file, copied only when absent.
    File,
    /// Directory tree, merged without overwriting.
    Directory,
    /// Flat directory of binary assets, kept in sync by checksum.
    ChecksumDir,
}

/// A packaged default item and its runtime destination.
#[derive(Debug, Clone)]
pub struct DefaultAsset {
    /// Synchronization flavor.
    pub kind: AssetKind,
    /// Path of the packaged item.
    pub packaged: PathBuf,
    /// Path the item is synchronized to.
    pub runtime: PathBuf,
}

/// One synchronization effect, for the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SyncAction {
    /// A missing file was created from its packaged default.
    Created {
        /// The created file.
        path: PathBuf,
    },
    /// Missing files were merged into a directory.
    MergedMissing {
        /// The directory that received files.
        path: PathBuf,
        /// How many files were copied.
        files: usize,
    },
    /// A binary asset was replaced because its checksum changed.
    Refreshed {
        /// The refreshed file.
        path: PathBuf,
    },
}

/// The standard asset manifest for an application data root.
pub fn default_assets(data_root: &Path, defaults_dir: &Path) -> Vec<DefaultAsset> {
    vec![
        DefaultAsset {
            kind: AssetKind::File,
            packaged: defaults_dir.join("config.yaml"),
            runtime: data_root.join("config.yaml"),
        },
        DefaultAsset {
            kind: AssetKind::Directory,
            packaged: defaults_dir.join("public"),
            runtime: data_root.join("public"),
        },
        DefaultAsset {
            kind: AssetKind::ChecksumDir,
            packaged: defaults_dir.join("dist"),
            runtime: data_root.join("dist"),
        },
    ]
}

/// Synchronize every asset, returning the actions taken.
///
/// Items whose packaged source does not exist are skipped quietly; an
/// application need not ship every asset flavor.
pub fn sync_assets(assets: &[DefaultAsset]) -> Vec<SyncAction> {
    let mut actions = Vec::new();

    for asset in assets {
        if !asset.packaged.exists() {
            debug!(packaged = %asset.packaged.display(), "no packaged asset, skipping");
            continue;
        }
        let result = match asset.kind {
            AssetKind::File => sync_file(asset, &mut actions),
            AssetKind::Directory => sync_directory(asset, &mut actions),
            AssetKind::ChecksumDir => sync_checksum_dir(asset, &mut actions),
        };
        if let Err(err) = result {
            error!(
                runtime = %asset.runtime.display(),
                %err,
                "could not synchronize default asset"
            );
        }
    }

    actions
}

fn sync_file(asset: &DefaultAsset, actions: &mut Vec<SyncAction>) -> io::Result<()> {
    if asset.runtime.exists() {
        return Ok(());
    }
    if let Some(parent) = asset.runtime.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&asset.packaged, &asset.runtime)?;
    info!(path = %asset.runtime.display(), "created default file");
    actions.push(SyncAction::Created {
        path: asset.runtime.clone(),
    });
    Ok(())
}

fn sync_directory(asset: &DefaultAsset, actions: &mut Vec<SyncAction>) -> io::Result<()> {
    let copied = copy_missing(&asset.packaged, &asset.runtime)?;
    if copied > 0 {
        info!(path = %asset.runtime.display(), files = copied, "merged missing default files");
        actions.push(SyncAction::MergedMissing {
            path: asset.runtime.clone(),
            files: copied,
        });
    }
    Ok(())
}

fn copy_missing(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_missing(&entry.path(), &target)?;
        } else if !target.exists() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sync_checksum_dir(asset: &DefaultAsset, actions: &mut Vec<SyncAction>) -> io::Result<()> {
    fs::create_dir_all(&asset.runtime)?;
    for entry in fs::read_dir(&asset.packaged)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let target = asset.runtime.join(entry.file_name());
        if target.exists() && sha256_file(&entry.path())? == sha256_file(&target)? {
            continue;
        }
        fs::copy(entry.path(), &target)?;
        info!(path = %target.display(), "refreshed binary asset");
        actions.push(SyncAction::Refreshed { path: target });
    }
    Ok(())
}

fn sha256_file(path: &Path) -> io::Result<String> {
    let data = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}
