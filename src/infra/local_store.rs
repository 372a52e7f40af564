//! TOML-backed client-local key/value store.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Result;
use toml_edit::{value, DocumentMut};

use crate::infra::{contracts::LocalStore, error::AppError};

#[derive(Debug, Clone)]
pub struct TomlLocalStore {
    path: PathBuf,
}

impl TomlLocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<DocumentMut, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(AppError::LocalStoreRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        raw.parse::<DocumentMut>()
            .map_err(|source| AppError::LocalStoreParse {
                path: self.path.clone(),
                source,
            })
    }
}

impl LocalStore for TomlLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let document = self.read_document()?;

        Ok(document
            .get(key)
            .and_then(|item| item.as_str())
            .map(ToOwned::to_owned))
    }

    /// Writes `key`, keeping every other entry and its formatting intact.
    fn set(&mut self, key: &str, new_value: &str) -> Result<()> {
        let mut document = self.read_document()?;
        document[key] = value(new_value);

        fs::write(&self.path, document.to_string()).map_err(|source| {
            AppError::LocalStoreWrite {
                path: self.path.clone(),
                source,
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let store = TomlLocalStore::new(dir.path().join("local_storage.toml"));

        assert_eq!(store.get("chat-username").expect("get should succeed"), None);
    }

    #[test]
    fn set_then_get_returns_value() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let mut store = TomlLocalStore::new(dir.path().join("local_storage.toml"));

        store
            .set("chat-username", "alice")
            .expect("set should succeed");

        assert_eq!(
            store.get("chat-username").expect("get should succeed"),
            Some("alice".to_owned())
        );
    }

    #[test]
    fn set_preserves_other_entries_and_comments() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("local_storage.toml");
        fs::write(&path, "# kept\ntheme = \"dark\"\n").expect("fixture should be writable");
        let mut store = TomlLocalStore::new(&path);

        store.set("chat-username", "bob").expect("set should succeed");

        let raw = fs::read_to_string(&path).expect("store file should be readable");
        assert!(raw.contains("# kept"));
        assert!(raw.contains("theme = \"dark\""));
        assert!(raw.contains("chat-username = \"bob\""));
    }

    #[test]
    fn non_string_values_read_as_absent() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("local_storage.toml");
        fs::write(&path, "chat-username = 42\n").expect("fixture should be writable");
        let store = TomlLocalStore::new(&path);

        assert_eq!(store.get("chat-username").expect("get should succeed"), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("local_storage.toml");
        fs::write(&path, "not = [valid").expect("fixture should be writable");
        let store = TomlLocalStore::new(&path);

        assert!(store.get("chat-username").is_err());
    }
}
