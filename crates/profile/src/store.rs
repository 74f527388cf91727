//! Key-value persistence for the current profile.
//!
//! Records are stored as JSON text under a single key, the way a browser's
//! local storage would hold them. A record that fails to parse is treated as
//! absent and logged, never surfaced as an error.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::profile::Profile;
use crate::types::PROFILE_KEY;

pub trait ProfileStore: Send {
    fn get(&self) -> Option<Profile>;
    fn set(&mut self, profile: &Profile) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

fn decode(raw: &str) -> Option<Profile> {
    match serde_json::from_str(raw) {
        Ok(profile) => Some(profile),
        Err(err) => {
            log::warn!("discarding unreadable profile record: {err}");
            None
        }
    }
}

/// In-process store. Holds the raw JSON text so corrupt records behave the
/// same as on disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self) -> Option<Profile> {
        self.raw.as_deref().and_then(decode)
    }

    fn set(&mut self, profile: &Profile) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(profile)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

/// A JSON object file mapping keys to JSON-encoded records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, PROFILE_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the whole key map. A missing file is empty; an unreadable one
    /// is logged and treated as empty.
    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_err(err)),
        };
        match serde_json::from_str(&text) {
            Ok(map) => Ok(map),
            Err(err) => {
                log::warn!("profile file {} is corrupt: {err}", self.path.display());
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        let text = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }
}

impl ProfileStore for JsonFileStore {
    fn get(&self) -> Option<Profile> {
        match self.read_map() {
            Ok(map) => map.get(&self.key).and_then(|raw| decode(raw)),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }

    fn set(&mut self, profile: &Profile) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(self.key.clone(), serde_json::to_string(profile)?);
        self.write_map(&map)?;
        log::debug!("saved profile {} to {}", profile.id, self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(&self.key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::Avatar;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert!(store.get().is_none());

        let profile = Profile::new("Ada", "ada@x", Avatar::default());
        store.set(&profile).unwrap();
        assert_eq!(store.get(), Some(profile));

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn corrupt_record_reads_as_none() {
        let store = MemoryStore::with_raw("{not json");
        assert!(store.get().is_none());
        assert_eq!(store.raw(), Some("{not json"));
    }
}
