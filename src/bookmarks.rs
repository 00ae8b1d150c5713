//! Persisted bookmarks: reference string to timestamp and note.
//!
//! The store is a single JSON file, loaded whole on open and rewritten
//! whole on every save. A missing file is an empty store, not an error;
//! the tool is single-user, so no locking is needed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A saved reference with its note and save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// When the bookmark was last saved.
    pub timestamp: DateTime<Local>,
    /// User note; may be empty.
    pub note: String,
}

/// On-disk bookmark store keyed by canonical reference string.
#[derive(Debug)]
pub struct BookmarkStore {
    path: PathBuf,
    entries: BTreeMap<String, Bookmark>,
}

impl BookmarkStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store; any other IO or decode
    /// failure is reported with path context.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs_err::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| Error::parse(e.to_string(), path.clone()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(e, path.clone())),
        };
        debug!(path = %path.display(), entries = entries.len(), "bookmark store opened");
        Ok(Self { path, entries })
    }

    /// Insert or overwrite the bookmark for `reference`, stamping it with
    /// the current time, and persist the whole store.
    pub fn save(&mut self, reference: impl Into<String>, note: impl Into<String>) -> Result<()> {
        self.entries
            .insert(reference.into(), Bookmark { timestamp: Local::now(), note: note.into() });
        self.persist()
    }

    /// Write the full store back to disk.
    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs_err::create_dir_all(parent)
                    .map_err(|e| Error::io(e, parent.to_path_buf()))?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| Error::parse(e.to_string(), self.path.clone()))?;
        fs_err::write(&self.path, json).map_err(|e| Error::io(e, self.path.clone()))
    }

    /// The bookmark saved for a reference, if any.
    #[must_use]
    pub fn get(&self, reference: &str) -> Option<&Bookmark> {
        self.entries.get(reference)
    }

    /// All bookmarks in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Bookmark)> {
        self.entries.iter()
    }

    /// Number of saved bookmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookmarkStore::open(dir.path().join("bookmarks.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn saved_bookmarks_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");

        let mut store = BookmarkStore::open(&path).unwrap();
        store.save("John 3:16", "for God so loved").unwrap();
        drop(store);

        let store = BookmarkStore::open(&path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("John 3:16").unwrap().note, "for God so loved");
    }

    #[test]
    fn resaving_overwrites_without_growing_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");

        let mut store = BookmarkStore::open(&path).unwrap();
        store.save("John 3:16", "first note").unwrap();
        let first_stamp = store.get("John 3:16").unwrap().timestamp;

        store.save("John 3:16", "second note").unwrap();
        assert_eq!(store.len(), 1);
        let updated = store.get("John 3:16").unwrap();
        assert_eq!(updated.note, "second note");
        assert!(updated.timestamp >= first_stamp);
    }

    #[test]
    fn parent_directories_are_created_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("bookmarks.json");

        let mut store = BookmarkStore::open(&path).unwrap();
        store.save("Genesis 1:1", "").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_store_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(BookmarkStore::open(&path), Err(Error::Parse { .. })));
    }
}
