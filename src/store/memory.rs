use super::KvStore;
use crate::error::AppResult;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Process-local store. Each instance has its own map, so links are neither
/// shared between processes nor kept across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    async fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: &str) -> AppResult<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
        }
    }

    async fn entries(&self) -> AppResult<Vec<(String, String)>> {
        Ok(self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
