use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single piece of editable site content
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

/// A recorded client status ping
#[derive(Debug, Clone, PartialEq)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Persistence backend for site data.
///
/// Implementations must make `upsert_content` a single atomic write keyed on
/// `ContentItem::key`, so concurrent writers to one key resolve as last write
/// wins and never leave two rows for the same key.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Insert the item, or replace the stored item with the same key.
    ///
    /// A replace overwrites every column, `updated_by` included, so the row
    /// always records whoever wrote the current value.
    async fn upsert_content(&self, item: &ContentItem) -> Result<()>;

    /// Every stored content item, in key order
    async fn list_content(&self) -> Result<Vec<ContentItem>>;

    async fn read_content(&self, key: &str) -> Result<Option<ContentItem>>;

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<()>;

    /// Most recent status checks first
    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>>;

    /// Cheap round trip proving the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Key/value view of site content used by the HTTP handlers.
///
/// Writes propagate storage failures to the caller. Reads never fail: a
/// storage error is logged and reported as an empty result so public pages
/// keep rendering while the backend is degraded.
#[derive(Clone)]
pub struct ContentRepository {
    store: Arc<dyn SiteStore>,
}

impl ContentRepository {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self { store }
    }

    /// Create or replace the value stored under `key`
    pub async fn upsert(&self, key: &str, value: &str, actor: &str) -> Result<ContentItem> {
        let item = ContentItem {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
            updated_by: actor.to_string(),
        };

        self.store.upsert_content(&item).await?;

        tracing::debug!("Upserted content key '{}' by {}", item.key, item.updated_by);
        Ok(item)
    }

    pub async fn get_all(&self) -> BTreeMap<String, String> {
        match self.store.list_content().await {
            Ok(items) => items
                .into_iter()
                .map(|item| (item.key, item.value))
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to list content, serving empty set: {:#}", e);
                BTreeMap::new()
            }
        }
    }

    pub async fn get_by_key(&self, key: &str) -> Option<String> {
        match self.store.read_content(key).await {
            Ok(item) => item.map(|item| item.value),
            Err(e) => {
                tracing::warn!("Failed to read content key '{}', serving absent: {:#}", key, e);
                None
            }
        }
    }
}
