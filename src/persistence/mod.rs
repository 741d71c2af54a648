//! Byte-level persistence backends
//!
//! Stores know nothing about what they hold; the highscore list serializes
//! itself to JSON and hands over bytes.

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

/// Failure while writing persisted data
#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage i/o failed: {e}"),
            Self::Encode(e) => write!(f, "serialization failed: {e}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for PersistError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

/// Whole-blob storage
pub trait PersistentStore {
    /// Stored bytes, or `None` if nothing is stored or it can't be read
    fn read_all(&self) -> Option<Vec<u8>>;
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PersistError>;
}

/// Single file on disk. Writes go to a temp file first and are renamed over
/// the target so a crash never leaves a half-written list.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistentStore for FileStore {
    fn read_all(&self) -> Option<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same buffer, so a caller can keep one
/// clone to inspect what the game wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Rc::new(RefCell::new(Some(bytes.into()))),
        }
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.data.borrow().clone()
    }
}

impl PersistentStore for MemoryStore {
    fn read_all(&self) -> Option<Vec<u8>> {
        self.contents()
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PersistError> {
        *self.data.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_buffer() {
        let inspect = MemoryStore::new();
        let mut store = inspect.clone();
        assert!(store.read_all().is_none());

        store.write_all(b"hello").unwrap();
        assert_eq!(inspect.contents().as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("scores.json"));
        assert!(store.read_all().is_none());
    }

    #[test]
    fn test_file_store_write_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.json");
        let mut store = FileStore::new(&path);

        store.write_all(b"[]").unwrap();
        assert_eq!(store.read_all().as_deref(), Some(&b"[]"[..]));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_file_store_write_into_file_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let mut store = FileStore::new(blocker.join("scores.json"));
        let err = store.write_all(b"[]").unwrap_err();
        assert!(matches!(err, PersistError::Io(_)));
    }
}
