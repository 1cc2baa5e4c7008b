use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::core::errors::WalletError;

/// Key-value store persisted as a single JSON object file.
///
/// Every write rewrites the whole file through `<path>.tmp` + rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    }

    /// Raw file contents; `None` when the file is missing or blank.
    fn read_raw(&self) -> Result<Option<String>, WalletError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(None),
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WalletError::PersistenceFailure(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>, WalletError> {
        serde_json::from_str(content)
            .map_err(|e| WalletError::PersistenceFailure(format!("{}: {}", self.path.display(), e)))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, WalletError> {
        match self.read_raw()? {
            Some(content) => self.parse(&content),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Entries to rewrite. An unparsable file is moved to `<path>.corrupt`
    /// and writing starts over from an empty map.
    fn read_for_write(&self) -> Result<BTreeMap<String, String>, WalletError> {
        let Some(content) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };
        match self.parse(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let corrupt = self.sibling(".corrupt");
                fs::rename(&self.path, &corrupt).map_err(|io| {
                    WalletError::PersistenceFailure(format!(
                        "failed to move unreadable {} aside: {}",
                        self.path.display(),
                        io
                    ))
                })?;
                warn!(error = %e, moved_to = %corrupt.display(), "unreadable store set aside");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), WalletError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Failed to create store dir {:?}: {}", parent, e);
                }
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.sibling(".tmp");

        fs::write(&tmp, content).map_err(|e| {
            WalletError::PersistenceFailure(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            WalletError::PersistenceFailure(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), keys = entries.len(), "store written");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), WalletError> {
        let mut entries = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), WalletError> {
        let mut entries = self.read_for_write()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
