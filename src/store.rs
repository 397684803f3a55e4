//! Key/value storage that outlives a single page view.
//!
//! The sidebar only ever keeps one value here, its scroll offset between page loads, and reads it
//! back exactly once. Storage is best-effort: a store that cannot persist logs and carries on.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Opaque string store provided by the host.
pub trait Store {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String);

    /// Deletes a value.
    fn remove(&mut self, key: &str);

    /// Reads a value and deletes it in the same step.
    fn take(&mut self, key: &str) -> Option<String> {
        let value = self.get(key);
        self.remove(key);
        value
    }
}

#[derive(Default, Debug)]
/// Store that lives only as long as the process.
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[derive(Debug)]
/// Store mirrored to a JSON object on disk after every change.
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, starting empty if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            HashMap::new()
        };
        Ok(Self { path, values })
    }

    fn persist(&self) {
        let written = serde_json::to_string_pretty(&self.values)
            .map_err(crate::Error::from)
            .and_then(|json| fs::write(&self.path, json).map_err(crate::Error::from));
        if let Err(e) = written {
            tracing::warn!(path = %self.path.display(), "failed to persist session state: {e}");
        }
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
