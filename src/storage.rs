//! Blob store seam for saved games. The store moves opaque bytes; the
//! blob's shape is owned by [`crate::game::encoding`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed byte-blob store.
pub trait SaveStore {
    fn save(&mut self, key: &str, blob: &[u8]) -> StoreResult<()>;
    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn delete(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl SaveStore for MemoryStore {
    fn save(&mut self, key: &str, blob: &[u8]) -> StoreResult<()> {
        self.blobs.insert(key.to_owned(), blob.to_vec());
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Store keeping each blob in a file named after its key inside one
/// directory. The directory is created on first save.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SaveStore for FileStore {
    fn save(&mut self, key: &str, blob: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), blob)?;
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
