use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::store::{ContentItem, SiteStore, StatusCheck};

/// In-process store for local development and tests.
///
/// Content lives in a map keyed by content key, so an upsert is a single
/// insert under the write lock.
#[derive(Default)]
pub struct MemoryStore {
    content: RwLock<BTreeMap<String, ContentItem>>,
    status_checks: RwLock<Vec<StatusCheck>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn upsert_content(&self, item: &ContentItem) -> Result<()> {
        self.content
            .write()
            .await
            .insert(item.key.clone(), item.clone());
        Ok(())
    }

    async fn list_content(&self) -> Result<Vec<ContentItem>> {
        Ok(self.content.read().await.values().cloned().collect())
    }

    async fn read_content(&self, key: &str) -> Result<Option<ContentItem>> {
        Ok(self.content.read().await.get(key).cloned())
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<()> {
        self.status_checks.write().await.push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let mut checks = self.status_checks.read().await.clone();
        checks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        checks.truncate(limit);
        Ok(checks)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
