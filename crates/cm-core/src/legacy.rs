//! One-time conversion of the legacy flat configuration format.
//!
//! The legacy `config.conf` is a flat `key = value` file with `#` comments
//! and dotted keys for nesting. Conversion is best-effort and runs exactly
//! once: the original file is backed up to `config.conf.bak` and removed, so
//! a later run finds nothing to convert. This importer sits outside the
//! reconciliation engine's trust boundary; a file it cannot parse is a fatal
//! conversion error and the raw file is left for a human to fix.

use crate::error::{CoreError, Result};
use crate::store;
use cm_tree::{ConfigTree, ConfigValue, KeyPath};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Legacy flat configuration file name.
pub const LEGACY_FILE: &str = "config.conf";

/// Backup name the legacy file is preserved under after conversion.
pub const BACKUP_FILE: &str = "config.conf.bak";

/// What the conversion step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LegacyOutcome {
    /// No legacy file present; nothing to convert.
    NotPresent,
    /// Both the legacy and the current file exist; the user must delete the
    /// legacy file manually.
    SkippedBothExist,
    /// Dry-run: a legacy file is present and would be converted.
    WouldConvert,
    /// Converted successfully; the original is preserved at `backup`.
    Converted {
        /// Path of the backup copy.
        backup: PathBuf,
    },
}

/// Convert `config.conf` under `data_root` into `config_path`, if present.
pub fn convert_legacy(data_root: &Path, config_path: &Path, dry_run: bool) -> Result<LegacyOutcome> {
    let legacy_path = data_root.join(LEGACY_FILE);
    if !legacy_path.exists() {
        return Ok(LegacyOutcome::NotPresent);
    }
    if config_path.exists() {
        warn!(
            legacy = %legacy_path.display(),
            current = %config_path.display(),
            "both legacy and current config exist; delete the legacy file manually"
        );
        return Ok(LegacyOutcome::SkippedBothExist);
    }
    if dry_run {
        return Ok(LegacyOutcome::WouldConvert);
    }

    let text = fs::read_to_string(&legacy_path).map_err(|e| CoreError::io(&legacy_path, e))?;
    let tree = parse_flat(&text)?;

    let backup = data_root.join(BACKUP_FILE);
    fs::copy(&legacy_path, &backup).map_err(|e| CoreError::io(&backup, e))?;
    fs::remove_file(&legacy_path).map_err(|e| CoreError::io(&legacy_path, e))?;
    store::save_tree(config_path, &tree)?;

    info!(
        from = %legacy_path.display(),
        to = %config_path.display(),
        "converted legacy configuration; check the result and fix it if necessary"
    );
    Ok(LegacyOutcome::Converted { backup })
}

/// Parse the flat `key = value` format into a hierarchical tree.
///
/// Values are parsed as YAML scalars (so `true`, `42`, and quoted strings all
/// come out typed); anything unparsable falls back to a raw string. Dotted
/// keys nest; a key conflicting with an earlier scalar is a conversion error.
pub fn parse_flat(text: &str) -> Result<ConfigTree> {
    let mut tree = ConfigTree::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| {
            CoreError::LegacyConversion(format!("line {}: expected 'key = value'", idx + 1))
        })?;

        let path: KeyPath = key.trim().parse().map_err(|e| {
            CoreError::LegacyConversion(format!("line {}: {}", idx + 1, e))
        })?;
        let value = parse_scalar_like(value.trim());

        tree.set(&path, value).map_err(|e| {
            CoreError::LegacyConversion(format!("line {}: {}", idx + 1, e))
        })?;
    }

    Ok(tree)
}

fn parse_scalar_like(text: &str) -> ConfigValue {
    if text.is_empty() {
        return ConfigValue::null();
    }
    serde_yaml::from_str(text).unwrap_or_else(|_| ConfigValue::from(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_tree::ConfigValue;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flat_types_and_nesting() {
        let tree = parse_flat(
            "# legacy settings\n\
             disableThumbnails = true\n\
             thumbnailsQuality = 80\n\
             extras.captioningModel = blip\n\
             greeting = \"hello world\"\n\
             empty =\n",
        )
        .unwrap();

        assert_eq!(
            tree.get(&"disableThumbnails".parse().unwrap()),
            Some(&ConfigValue::from(true))
        );
        assert_eq!(
            tree.get(&"thumbnailsQuality".parse().unwrap()),
            Some(&ConfigValue::from(80))
        );
        assert_eq!(
            tree.get(&"extras.captioningModel".parse().unwrap()),
            Some(&ConfigValue::from("blip"))
        );
        assert_eq!(
            tree.get(&"greeting".parse().unwrap()),
            Some(&ConfigValue::from("hello world"))
        );
        assert_eq!(tree.get(&"empty".parse().unwrap()), Some(&ConfigValue::null()));
    }

    #[test]
    fn test_parse_flat_rejects_malformed_lines() {
        let err = parse_flat("no equals sign here\n").unwrap_err();
        assert!(matches!(err, CoreError::LegacyConversion(_)));
    }

    #[test]
    fn test_parse_flat_rejects_conflicting_keys() {
        let err = parse_flat("a = 1\na.b = 2\n").unwrap_err();
        assert!(matches!(err, CoreError::LegacyConversion(_)));
    }

    #[test]
    fn test_convert_backs_up_and_removes_legacy() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(dir.path().join(LEGACY_FILE), "minLogLevel = 2\n").unwrap();

        let outcome = convert_legacy(dir.path(), &config_path, false).unwrap();

        assert_eq!(
            outcome,
            LegacyOutcome::Converted {
                backup: dir.path().join(BACKUP_FILE)
            }
        );
        assert!(!dir.path().join(LEGACY_FILE).exists());
        assert!(dir.path().join(BACKUP_FILE).exists());

        let tree = store::load_tree(&config_path).unwrap();
        assert_eq!(tree.get(&"minLogLevel".parse().unwrap()), Some(&ConfigValue::from(2)));
    }

    #[test]
    fn test_convert_skips_when_both_exist() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(dir.path().join(LEGACY_FILE), "a = 1\n").unwrap();
        fs::write(&config_path, "a: 2\n").unwrap();

        let outcome = convert_legacy(dir.path(), &config_path, false).unwrap();

        assert_eq!(outcome, LegacyOutcome::SkippedBothExist);
        assert!(dir.path().join(LEGACY_FILE).exists());
    }

    #[test]
    fn test_convert_nothing_to_do() {
        let dir = TempDir::new().unwrap();
        let outcome = convert_legacy(dir.path(), &dir.path().join("config.yaml"), false).unwrap();
        assert_eq!(outcome, LegacyOutcome::NotPresent);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        fs::write(dir.path().join(LEGACY_FILE), "a = 1\n").unwrap();

        let outcome = convert_legacy(dir.path(), &config_path, true).unwrap();

        assert_eq!(outcome, LegacyOutcome::WouldConvert);
        assert!(dir.path().join(LEGACY_FILE).exists());
        assert!(!config_path.exists());
    }
}
