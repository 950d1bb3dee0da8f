//! File-backed backend: one JSON file per key inside a data directory.

use crate::{CacheError, KvStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// A durable store rooted at a directory.
///
/// Keys may contain ASCII letters, digits, `-`, `_` and `:` separators. A key
/// like `persist:cart` lands in `persist.cart.json`. Writes go to a temporary
/// file first and are renamed into place, so a crash mid-write leaves the
/// previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CacheError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| CacheError::OpenError {
            path: root.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Directory holding the stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        let stem = key.replace(':', ".");
        Ok(self.root.join(format!("{stem}.{EXTENSION}")))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(key, bytes = value.len(), "wrote file store entry");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map_or(true, |e| e != EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.replace('.', ":"));
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        store.set("persist:cart", br#"{"lines":[]}"#).unwrap();
        drop(store);

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("persist:cart").unwrap(),
            Some(br#"{"lines":[]}"#.to_vec())
        );
        assert!(dir.path().join("persist.cart.json").is_file());
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("persist:wishlist").unwrap(), None);
        assert!(!store.exists("persist:wishlist").unwrap());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("persist:cart", b"1").unwrap();
        store.delete("persist:cart").unwrap();
        store.delete("persist:cart").unwrap();
        assert!(!store.exists("persist:cart").unwrap());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(CacheError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(CacheError::InvalidKey(_))));
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("persist:wishlist", b"[]").unwrap();
        store.set("persist:cart", b"[]").unwrap();
        fs::write(dir.path().join("notes.txt"), b"hi").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["persist:cart", "persist:wishlist"]);
    }
}
