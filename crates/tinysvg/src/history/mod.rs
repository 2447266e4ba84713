// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion history.
//!
//! All entries are stored as a single JSON array, newest first.

use serde::{Deserialize, Serialize};

use crate::Error;

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

/// The maximum number of kept entries.
pub const MAX_ENTRIES: usize = 50;

/// The number of entries returned by [`History::recent`] by default.
pub const RECENT_ENTRIES_COUNT: usize = 3;

const ENTRIES_KEY: &str = "entries";

/// A saved conversion.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// A content hash followed by a timestamp.
    pub id: String,
    #[allow(missing_docs)]
    pub file_name: String,
    #[allow(missing_docs)]
    pub original_svg: String,
    #[allow(missing_docs)]
    pub compressed_svg: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// A data URI. Can be empty.
    pub thumbnail: String,
    /// Options used for optimization.
    pub config: svgtidy::Options,
    /// Size in bytes.
    pub original_size: usize,
    /// Size in bytes.
    pub compressed_size: usize,
}

/// A new history entry.
#[derive(Clone, PartialEq, Debug)]
pub struct NewEntry {
    #[allow(missing_docs)]
    pub file_name: String,
    #[allow(missing_docs)]
    pub original_svg: String,
    #[allow(missing_docs)]
    pub compressed_svg: String,
    #[allow(missing_docs)]
    pub thumbnail: String,
    #[allow(missing_docs)]
    pub config: svgtidy::Options,
    #[allow(missing_docs)]
    pub original_size: usize,
    #[allow(missing_docs)]
    pub compressed_size: usize,
}

/// A history on top of a [`Storage`].
#[derive(Debug)]
pub struct History<S: Storage> {
    storage: S,
}

impl History<FileStorage> {
    /// Opens a history in the user data directory.
    pub fn open_default() -> Option<Self> {
        FileStorage::default_dir().map(|dir| History::new(FileStorage::new(dir)))
    }
}

impl<S: Storage> History<S> {
    /// Creates a history.
    pub fn new(storage: S) -> Self {
        History { storage }
    }

    /// Saves an entry and returns its id.
    ///
    /// An entry with the same original content and file name is not saved twice,
    /// but a new id is returned anyway.
    pub fn save(&mut self, entry: NewEntry) -> Result<String, Error> {
        self.save_at(entry, chrono::Utc::now().timestamp_millis())
    }

    fn save_at(&mut self, entry: NewEntry, timestamp: i64) -> Result<String, Error> {
        let hash = content_hash(&entry.original_svg);
        let id = format!("{}-{}", hash, timestamp);

        let mut entries = self.all()?;
        let is_duplicate = entries
            .iter()
            .any(|e| content_hash(&e.original_svg) == hash && e.file_name == entry.file_name);
        if is_duplicate {
            log::debug!("'{}' is already in history.", entry.file_name);
            return Ok(id);
        }

        entries.insert(
            0,
            HistoryEntry {
                id: id.clone(),
                file_name: entry.file_name,
                original_svg: entry.original_svg,
                compressed_svg: entry.compressed_svg,
                timestamp,
                thumbnail: entry.thumbnail,
                config: entry.config,
                original_size: entry.original_size,
                compressed_size: entry.compressed_size,
            },
        );
        entries.truncate(MAX_ENTRIES);

        self.write(&entries)?;
        Ok(id)
    }

    /// Returns all entries, newest first.
    pub fn all(&self) -> Result<Vec<HistoryEntry>, Error> {
        match self.storage.get_item(ENTRIES_KEY)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Returns up to `count` newest entries.
    pub fn recent(&self, count: usize) -> Result<Vec<HistoryEntry>, Error> {
        let mut entries = self.all()?;
        entries.truncate(count);
        Ok(entries)
    }

    /// Returns an entry by id.
    pub fn get(&self, id: &str) -> Result<Option<HistoryEntry>, Error> {
        Ok(self.all()?.into_iter().find(|e| e.id == id))
    }

    /// Removes an entry by id.
    pub fn delete(&mut self, id: &str) -> Result<(), Error> {
        let mut entries = self.all()?;
        entries.retain(|e| e.id != id);
        self.write(&entries)
    }

    /// Removes all entries.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.storage.remove_item(ENTRIES_KEY)
    }

    /// Returns the number of entries.
    pub fn count(&self) -> Result<usize, Error> {
        Ok(self.all()?.len())
    }

    fn write(&mut self, entries: &[HistoryEntry]) -> Result<(), Error> {
        let data = serde_json::to_string(entries)?;
        self.storage.set_item(ENTRIES_KEY, &data)
    }
}

/// Calculates a short content hash.
///
/// A 31-multiplier 32-bit hash over UTF-16 code units, written in base 36.
pub fn content_hash(text: &str) -> String {
    let mut hash: i32 = 0;
    for c in text.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(c));
    }

    to_base36(i64::from(hash).unsigned_abs())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Formats a timestamp relative to `now`. Both are in milliseconds.
///
/// Older than a week timestamps are formatted as a local date.
pub fn format_timestamp(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;
    let mins = diff.div_euclid(60_000);
    let hours = diff.div_euclid(3_600_000);
    let days = diff.div_euclid(86_400_000);

    if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        match chrono::DateTime::from_timestamp_millis(timestamp) {
            Some(date) => date.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string(),
            None => timestamp.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, svg: &str) -> NewEntry {
        NewEntry {
            file_name: name.to_string(),
            original_svg: svg.to_string(),
            compressed_svg: svg.to_string(),
            thumbnail: String::new(),
            config: svgtidy::Options::default(),
            original_size: svg.len(),
            compressed_size: svg.len(),
        }
    }

    #[test]
    fn hash() {
        assert_eq!(content_hash(""), "0");
        // 'a' = 97
        assert_eq!(content_hash("a"), "2p");
        // 97 * 31 + 98 = 3105
        assert_eq!(content_hash("ab"), "2e9");
    }

    #[test]
    fn hash_overflow() {
        // Must not panic and must stay positive.
        let h = content_hash(&"<svg/>".repeat(1000));
        assert!(!h.starts_with('-'));
    }

    #[test]
    fn ids() {
        let mut history = History::new(MemoryStorage::new());
        let id = history.save_at(entry("a.svg", "a"), 1000).unwrap();
        assert_eq!(id, "2p-1000");
        assert_eq!(history.get("2p-1000").unwrap().unwrap().timestamp, 1000);
    }

    #[test]
    fn duplicates() {
        let mut history = History::new(MemoryStorage::new());
        history.save_at(entry("a.svg", "<svg/>"), 1).unwrap();
        let id = history.save_at(entry("a.svg", "<svg/>"), 2).unwrap();
        assert!(id.ends_with("-2"));
        assert_eq!(history.count().unwrap(), 1);
        assert!(history.get(&id).unwrap().is_none());

        history.save_at(entry("b.svg", "<svg/>"), 3).unwrap();
        assert_eq!(history.count().unwrap(), 2);
    }

    #[test]
    fn capacity() {
        let mut history = History::new(MemoryStorage::new());
        for i in 0..(MAX_ENTRIES + 5) {
            history.save_at(entry(&format!("{}.svg", i), "<svg/>"), i as i64).unwrap();
        }

        let all = history.all().unwrap();
        assert_eq!(all.len(), MAX_ENTRIES);
        assert_eq!(all[0].file_name, "54.svg");

        let recent = history.recent(RECENT_ENTRIES_COUNT).unwrap();
        let names: Vec<_> = recent.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, ["54.svg", "53.svg", "52.svg"]);
    }

    #[test]
    fn delete_and_clear() {
        let mut history = History::new(MemoryStorage::new());
        let id = history.save_at(entry("a.svg", "a"), 1).unwrap();
        history.save_at(entry("b.svg", "b"), 2).unwrap();

        history.delete(&id).unwrap();
        assert_eq!(history.count().unwrap(), 1);
        history.delete("unknown").unwrap();
        assert_eq!(history.count().unwrap(), 1);

        history.clear().unwrap();
        assert_eq!(history.count().unwrap(), 0);
    }

    #[test]
    fn timestamps() {
        let now = 100 * 86_400_000;
        assert_eq!(format_timestamp(now - 30_000, now), "Just now");
        assert_eq!(format_timestamp(now + 30_000, now), "Just now");
        assert_eq!(format_timestamp(now - 5 * 60_000, now), "5m ago");
        assert_eq!(format_timestamp(now - 3 * 3_600_000, now), "3h ago");
        assert_eq!(format_timestamp(now - 2 * 86_400_000, now), "2d ago");

        let old = format_timestamp(now - 30 * 86_400_000, now);
        assert_eq!(old.len(), 10);
        assert!(old.starts_with("1970-"));
    }
}
