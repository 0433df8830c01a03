//! Files copied between the upstream and the dist-git repository

use serde::{Deserialize, Serialize};

/// One file copy declaration.
///
/// In a document an entry is either a bare path (copied to the same path)
/// or a `{src, dest}` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SyncFilesEntry")]
pub struct SyncFilesItem {
    pub src: String,
    pub dest: String,
}

impl SyncFilesItem {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }

    /// An entry copying `path` to the same relative path.
    pub fn same_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            src: path.clone(),
            dest: path,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SyncFilesEntry {
    Path(String),
    Pair { src: String, dest: String },
}

impl From<SyncFilesEntry> for SyncFilesItem {
    fn from(entry: SyncFilesEntry) -> Self {
        match entry {
            SyncFilesEntry::Path(path) => Self::same_path(path),
            SyncFilesEntry::Pair { src, dest } => Self { src, dest },
        }
    }
}

/// Ordered list of file copy declarations.
///
/// The list itself accepts duplicate sources; only
/// [`SyncFilesConfig::push_if_src_absent`] checks for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncFilesConfig {
    files_to_sync: Vec<SyncFilesItem>,
}

impl SyncFilesConfig {
    pub fn new(files_to_sync: Vec<SyncFilesItem>) -> Self {
        Self { files_to_sync }
    }

    pub fn files(&self) -> &[SyncFilesItem] {
        &self.files_to_sync
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SyncFilesItem> {
        self.files_to_sync.iter()
    }

    pub fn len(&self) -> usize {
        self.files_to_sync.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files_to_sync.is_empty()
    }

    /// Append unconditionally.
    pub fn push(&mut self, item: SyncFilesItem) {
        self.files_to_sync.push(item);
    }

    pub fn contains_src(&self, src: &str) -> bool {
        self.files_to_sync.iter().any(|item| item.src == src)
    }

    /// Append `item` unless an entry with the same `src` exists.
    ///
    /// Only `src` is compared: an existing entry with a different `dest`
    /// is kept as is. Returns whether the item was appended.
    pub fn push_if_src_absent(&mut self, item: SyncFilesItem) -> bool {
        if self.contains_src(&item.src) {
            return false;
        }
        self.files_to_sync.push(item);
        true
    }
}

impl<'a> IntoIterator for &'a SyncFilesConfig {
    type Item = &'a SyncFilesItem;
    type IntoIter = std::slice::Iter<'a, SyncFilesItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.files_to_sync.iter()
    }
}

impl FromIterator<SyncFilesItem> for SyncFilesConfig {
    fn from_iter<I: IntoIterator<Item = SyncFilesItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
