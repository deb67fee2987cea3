//! File-backed key-value store.
//!
//! Each key is kept in its own `<key>.json` file under a root directory.
//! Writes go to a temporary file that is then renamed over the target, so a
//! reader sees either the old or the new value, never a partial one.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, Result, ports::KeyValueStore};

/// Directory-backed store.
///
/// # Examples
///
/// ```no_run
/// use snake_qlearn::adapters::FileStore;
/// use snake_qlearn::ports::KeyValueStore;
///
/// let store = FileStore::new(".snake_q");
/// store.set("QModel", "{}")?;
/// # Ok::<(), snake_qlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::invalid_config(format!(
                "store key '{key}' must be non-empty ASCII alphanumerics, '_' or '-'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                operation: format!("read {path:?}"),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|source| Error::Io {
            operation: format!("create directory {:?}", self.root),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| Error::Io {
            operation: format!("write {tmp:?}"),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| Error::Io {
            operation: format!("rename {tmp:?} to {path:?}"),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io {
                operation: format!("remove {path:?}"),
                source,
            }),
        }
    }
}
