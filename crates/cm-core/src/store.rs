//! YAML persistence for configuration trees.

use crate::error::{CoreError, Result};
use cm_tree::ConfigTree;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a configuration tree from a YAML file.
pub fn load_tree(path: &Path) -> Result<ConfigTree> {
    let text = fs::read_to_string(path).map_err(|source| CoreError::io(path, source))?;
    let tree = serde_yaml::from_str(&text).map_err(|err| CoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    debug!(path = %path.display(), "loaded configuration tree");
    Ok(tree)
}

/// Serialize a configuration tree back to a YAML file.
pub fn save_tree(path: &Path, tree: &ConfigTree) -> Result<()> {
    let yaml = serde_yaml::to_string(tree).map_err(|err| CoreError::Serialize {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    fs::write(path, yaml).map_err(|source| CoreError::io(path, source))?;
    info!(path = %path.display(), "wrote configuration");
    Ok(())
}
