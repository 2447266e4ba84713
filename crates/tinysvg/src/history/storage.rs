// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::Error;

/// A string key-value storage.
pub trait Storage {
    /// Returns a stored value.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Stores a value, replacing the previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error>;

    /// Removes a value. Does nothing when there is no such key.
    fn remove_item(&mut self, key: &str) -> Result<(), Error>;
}

/// A storage that keeps each key in a separate `<key>.json` file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage in the specified directory.
    ///
    /// The directory is created on the first write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Returns the default history directory inside the user data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("tinysvg").join("svg_history"))
    }

    /// Returns the storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        match std::fs::remove_file(self.path(key)) {
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            r => r.map_err(Error::from),
        }
    }
}

/// An in-memory storage.
#[derive(Clone, Default, Debug)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), Error> {
        self.items.remove(key);
        Ok(())
    }
}
