use folio_editor::id_generator::DEFAULT_ID_PREFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path of the JSON store, relative to the config file
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Keep a `.bak` copy of the store before a migration rewrites it
    #[serde(default = "default_backup_on_migrate")]
    pub backup_on_migrate: bool,

    /// Prefix for generated block ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

fn default_store_path() -> String {
    "data/db.json".to_string()
}

fn default_backup_on_migrate() -> bool {
    true
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store file
    pub fn get_store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            backup_on_migrate: default_backup_on_migrate(),
            id_prefix: default_id_prefix(),
        }
    }
}
