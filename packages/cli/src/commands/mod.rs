pub mod check;
pub mod extract;
pub mod init;
pub mod migrate;
pub mod new_block;

pub use check::{check, CheckArgs};
pub use extract::{extract, ExtractArgs};
pub use init::{init, InitArgs};
pub use migrate::{migrate, MigrateArgs};
pub use new_block::{new_block, NewBlockArgs};

use crate::config::Config;
use folio_store::JsonFileStore;
use std::path::PathBuf;

/// Resolved working directory, config, and store location
pub struct Context {
    pub cwd: PathBuf,
    pub config: Config,
    store_path: PathBuf,
}

impl Context {
    pub fn new(cwd: PathBuf, store_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::load(&cwd)?;
        let store_path = match store_override {
            Some(path) => cwd.join(path),
            None => config.get_store_path(&cwd),
        };

        Ok(Self {
            cwd,
            config,
            store_path,
        })
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_path).with_backup(self.config.backup_on_migrate)
    }
}
