// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Durable key-value storage for wizard snapshots.

use crate::error::CoreError;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// A key-value store holding serialized `WizardState` snapshots.
pub trait SnapshotStore {
    /// Returns the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be stored.
    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError>;
}

/// Snapshot store that lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    entries: HashMap<String, String>,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Snapshot store keeping one JSON file per key in a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    directory: PathBuf,
}

impl FileSnapshotStore {
    /// Opens a store rooted at `directory`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(directory: P) -> Result<Self, CoreError> {
        let directory: PathBuf = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory)
            .map_err(|e| CoreError::SnapshotStore(format!("{}: {e}", directory.display())))?;
        Ok(Self { directory })
    }

    /// The file a key is stored in.
    ///
    /// ASCII letters, digits and `-` are kept. Every other byte, `_` included,
    /// is written as `_` followed by two lowercase hex digits, so distinct keys
    /// never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut file_stem: String = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                file_stem.push(char::from(byte));
            } else {
                let _ = write!(file_stem, "_{byte:02x}");
            }
        }
        self.directory.join(format!("{file_stem}.json"))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CoreError> {
        let target: PathBuf = self.path_for(key);
        let staging: PathBuf = target.with_extension("json.tmp");

        std::fs::write(&staging, value)
            .and_then(|()| std::fs::rename(&staging, &target))
            .map_err(|e| CoreError::SnapshotStore(format!("{}: {e}", target.display())))
    }
}
