use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::infra::contracts::LocalStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryLocalStore {
    entries: HashMap<String, String>,
}

impl MemoryLocalStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store whose backing file is unreadable.
#[derive(Debug, Clone, Default)]
pub struct BrokenLocalStore;

impl LocalStore for BrokenLocalStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(anyhow!("local store unavailable"))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(anyhow!("local store unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let mut store = MemoryLocalStore::default();
        store.set("k", "v").expect("memory set should succeed");

        assert_eq!(store.get("k").expect("memory get"), Some("v".to_owned()));
        assert_eq!(store.get("missing").expect("memory get"), None);
    }
}
