//! Asset storage abstraction.

use std::fs;
use std::path::Path;

use crate::Result;

/// Where texture files are read from and written to.
pub trait AssetStore {
    /// Read a whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or replace a file.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Check whether a file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Delete a file.
    fn remove(&self, path: &Path) -> Result<()>;
}

/// [`AssetStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl AssetStore for FsStore {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, data)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("a.bin");
        let store = FsStore;

        assert!(!store.exists(&path));
        store.write(&path, &[1, 2, 3]).unwrap();
        assert!(store.exists(&path));
        assert_eq!(store.read(&path).unwrap(), vec![1, 2, 3]);

        store.remove(&path).unwrap();
        assert!(!store.exists(&path));
    }
}
