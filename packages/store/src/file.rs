use crate::{DocumentStore, StoreError, StoreResult};
use folio_editor::PostCollection;
use std::fs;
use std::path::{Path, PathBuf};

/// Post collection kept in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Copy the previous file to `<path>.bak` before each save
    backup: bool,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup: false,
        }
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        sibling(&self.path, ".bak")
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

impl DocumentStore for JsonFileStore {
    fn load_document(&self) -> StoreResult<PostCollection> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "store file missing, starting empty");
            return Ok(PostCollection::default());
        }

        let source = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&source).map_err(|e| StoreError::json(&self.path, e))
    }

    fn save_document(&self, collection: &PostCollection) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        if self.backup && self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|e| StoreError::io(&backup, e))?;
            tracing::debug!(backup = %backup.display(), "wrote store backup");
        }

        let json = serde_json::to_string_pretty(collection).map_err(|e| StoreError::json(&self.path, e))?;

        // Write beside the target and rename so readers never see a partial file.
        let staging = sibling(&self.path, ".tmp");
        fs::write(&staging, json).map_err(|e| StoreError::io(&staging, e))?;
        fs::rename(&staging, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), posts = collection.len(), "saved store");
        Ok(())
    }
}
