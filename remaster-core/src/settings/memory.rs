use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SettingsStore;
use crate::Result;

/// In-memory settings store used by tests and infrastructure-free dev runs.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw read bypassing the trait, for assertions on stored state.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
