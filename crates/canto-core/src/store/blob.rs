//! Named blob persistence: each sub-store is one JSON document.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The four independent sub-stores of a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobName {
    SavedWords,
    CustomNotes,
    Songs,
    Categories,
}

impl BlobName {
    pub const ALL: [BlobName; 4] = [
        BlobName::SavedWords,
        BlobName::CustomNotes,
        BlobName::Songs,
        BlobName::Categories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlobName::SavedWords => "cantonese_saved_words",
            BlobName::CustomNotes => "cantonese_custom_sentences",
            BlobName::Songs => "cantonese_songs",
            BlobName::Categories => "cantonese_conversations",
        }
    }
}

impl std::fmt::Display for BlobName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait BlobStore {
    /// Returns `None` when the blob has never been written.
    fn load(&self, name: BlobName) -> Result<Option<String>, io::Error>;
    /// Replace the whole blob.
    fn save(&mut self, name: BlobName, contents: &str) -> Result<(), io::Error>;
}

/// One `<name>.json` file per blob inside a directory.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: BlobName) -> PathBuf {
        self.dir.join(format!("{}.json", name.as_str()))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, name: BlobName) -> Result<Option<String>, io::Error> {
        match fs::read_to_string(self.path_of(name)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Atomic write: write to .tmp then rename.
    fn save(&mut self, name: BlobName, contents: &str) -> Result<(), io::Error> {
        let path = self.path_of(name);
        let tmp = path.with_extension("tmp");
        fs::create_dir_all(&self.dir)?;
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    blobs: HashMap<BlobName, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: BlobName, contents: impl Into<String>) -> Self {
        self.blobs.insert(name, contents.into());
        self
    }

    pub fn get(&self, name: BlobName) -> Option<&str> {
        self.blobs.get(&name).map(String::as_str)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, name: BlobName) -> Result<Option<String>, io::Error> {
        Ok(self.blobs.get(&name).cloned())
    }

    fn save(&mut self, name: BlobName, contents: &str) -> Result<(), io::Error> {
        self.blobs.insert(name, contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_names_are_distinct() {
        let mut names: Vec<&str> = BlobName::ALL.iter().map(|b| b.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested"));
        assert_eq!(store.load(BlobName::Songs).unwrap(), None);

        store.save(BlobName::Songs, "[]").unwrap();
        assert_eq!(store.load(BlobName::Songs).unwrap().as_deref(), Some("[]"));
        assert!(store.path_of(BlobName::Songs).exists());
        assert!(!store.path_of(BlobName::Songs).with_extension("tmp").exists());
    }

    #[test]
    fn file_save_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path());
        store.save(BlobName::CustomNotes, "[1,2,3]").unwrap();
        store.save(BlobName::CustomNotes, "[]").unwrap();
        assert_eq!(
            store.load(BlobName::CustomNotes).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryBlobStore::new().with(BlobName::SavedWords, "[]");
        assert_eq!(store.get(BlobName::SavedWords), Some("[]"));
        assert_eq!(store.load(BlobName::Categories).unwrap(), None);
        store.save(BlobName::Categories, "x").unwrap();
        assert_eq!(store.get(BlobName::Categories), Some("x"));
    }
}
