use std::{path::PathBuf, sync::Arc};

use crate::config::Config;
use color_eyre::Result;
use dirs::data_dir;
use famhub_store::json_file_store::JsonFileStore;
use tracing::debug;

/// Resolve the default data directory for FamHub.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = data_dir().ok_or_else(|| color_eyre::eyre::eyre!("no data dir available"))?;
    Ok(base.join("famhub"))
}

/// Build the JSON file store, honoring a config override for the root.
pub fn store_from_config(config: &Config) -> Result<Arc<JsonFileStore>> {
    let root = match &config.data_dir {
        Some(root) => {
            debug!(?root, "initializing store (config override)");
            root.clone()
        }
        None => {
            let root = default_data_dir()?;
            debug!(?root, "initializing store");
            root
        }
    };
    Ok(Arc::new(JsonFileStore::new(root)))
}

/// Helper for tests to construct a store rooted at a temp dir.
#[cfg(test)]
pub fn test_store(root: impl Into<PathBuf>) -> Arc<JsonFileStore> {
    Arc::new(JsonFileStore::new(root))
}
