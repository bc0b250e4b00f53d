//! In-memory store backend.

use crate::error::Result;
use crate::store::CredentialStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Best-effort store for hosts without a secure keystore.
///
/// Clones share the underlying map, which also makes this the
/// persisted-store stand-in in tests: a clone handed to a fresh component
/// simulates state surviving a process restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
