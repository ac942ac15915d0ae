//! Per-page records
//!
//! Each tracked page maps to the server version and content hash seen at the
//! last checkout or commit. On disk a record is the two-element array
//! `[version, "md5hex"]`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracwiki_fs::ContentHash;

/// Version and hash of a page as last synchronized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, ContentHash)", into = "(u64, ContentHash)")]
pub struct PageRecord {
    pub version: u64,
    pub hash: ContentHash,
}

impl PageRecord {
    pub fn new(version: u64, hash: ContentHash) -> Self {
        Self { version, hash }
    }
}

impl From<(u64, ContentHash)> for PageRecord {
    fn from((version, hash): (u64, ContentHash)) -> Self {
        Self { version, hash }
    }
}

impl From<PageRecord> for (u64, ContentHash) {
    fn from(record: PageRecord) -> Self {
        (record.version, record.hash)
    }
}

/// Tracked pages, in the order they were first checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataStore {
    records: IndexMap<String, PageRecord>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PageRecord> {
        self.records.get(name)
    }

    /// Insert or overwrite the record for `name`.
    ///
    /// Overwriting keeps the page's original position.
    pub fn put(&mut self, name: impl Into<String>, record: PageRecord) {
        self.records.insert(name.into(), record);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Names of all tracked pages in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
