//! Key-value string storage for document state.
//!
//! The document store reads every key once when it opens and writes a key after each change
//! that touches it. Values are opaque strings; the document store decides their encoding and
//! tolerates values it cannot decode.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Names of the persisted values.
pub enum StoreKey {
    /// The raw text the outline was imported from.
    RawInput,
    /// The live section tree as JSON.
    Sections,
    /// Name of the selected profile.
    Profile,
    /// Undo/redo snapshots and cursor as JSON.
    History,
}

impl StoreKey {
    #[must_use]
    /// Stable key name.
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::RawInput => "raw_input",
            StoreKey::Sections => "sections",
            StoreKey::Profile => "profile",
            StoreKey::History => "history",
        }
    }
}

/// Backing storage for the document store.
pub trait StateStore {
    /// Reads the value under `key`, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load(&self, key: StoreKey) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save(&mut self, key: StoreKey, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
/// In-process storage; nothing outlives the value.
pub struct MemoryStore {
    values: HashMap<StoreKey, String>,
}

impl MemoryStore {
    #[must_use]
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Store pre-seeded with `values`, e.g. to simulate a previous session.
    pub fn seeded(values: impl IntoIterator<Item = (StoreKey, String)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    #[must_use]
    /// Borrow the raw value under `key`.
    pub fn get(&self, key: StoreKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug)]
/// One file per key inside a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    /// Store rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    /// Directory holding the state files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        let name = match key {
            StoreKey::RawInput => format!("{}.md", key.as_str()),
            StoreKey::Profile => format!("{}.txt", key.as_str()),
            StoreKey::Sections | StoreKey::History => format!("{}.json", key.as_str()),
        };
        self.dir.join(name)
    }
}

impl StateStore for FileStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path(key);
        tracing::debug!("Attempting to read {} from: {:?}", key.as_str(), &path);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        tracing::debug!("Attempting to write {} to: {:?}", key.as_str(), &path);
        fs::write(path, value)?;
        Ok(())
    }
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: StoreKey, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

#[cfg(test)]
#[path = "tests/persist.rs"]
mod tests;
