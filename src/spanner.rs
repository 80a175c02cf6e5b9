use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::insert_or_update;
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::sync::Arc;

use crate::config::SpannerConfig;
use crate::store::{ContentItem, SiteStore, StatusCheck};

const CONTENT_TABLE: &str = "site_content";
const STATUS_TABLE: &str = "status_checks";

/// Tables this service owns, with the DDL used to create them
const TABLES: &[(&str, &str)] = &[
    (
        CONTENT_TABLE,
        r#"
CREATE TABLE site_content (
    content_key STRING(MAX) NOT NULL,
    content_value STRING(MAX) NOT NULL,
    updated_at TIMESTAMP NOT NULL,
    updated_by STRING(MAX) NOT NULL,
) PRIMARY KEY (content_key)
"#,
    ),
    (
        STATUS_TABLE,
        r#"
CREATE TABLE status_checks (
    id STRING(36) NOT NULL,
    client_name STRING(MAX) NOT NULL,
    checked_at TIMESTAMP NOT NULL,
) PRIMARY KEY (id)
"#,
    ),
];

/// Shareable Spanner-backed store for use across async handlers
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
}

impl SpannerStore {
    /// Create a new Spanner client from configuration
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST on its own
    /// and connects to the emulator when it is set.
    ///
    /// The instance, database and tables are created first if missing.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match config.emulator_host.as_deref() {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Run a query in a single-use read-only transaction and collect its rows
    async fn query_rows(&self, statement: Statement) -> Result<Vec<Row>> {
        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query Spanner")?;

        let mut rows = Vec::new();
        while let Some(row) = result_set.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Timestamps travel as RFC 3339 strings in both mutations and result rows
fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Failed to parse {} timestamp", column))?
        .with_timezone(&Utc))
}

fn content_from_row(row: &Row) -> Result<ContentItem> {
    let updated_at: String = row.column_by_name("updated_at")?;

    Ok(ContentItem {
        key: row.column_by_name("content_key")?,
        value: row.column_by_name("content_value")?,
        updated_at: parse_timestamp(&updated_at, "updated_at")?,
        updated_by: row.column_by_name("updated_by")?,
    })
}

#[async_trait]
impl SiteStore for SpannerStore {
    /// Single-row `insert_or_update`: Spanner commits it atomically, so racing
    /// writers to the same key end with the last committed value.
    async fn upsert_content(&self, item: &ContentItem) -> Result<()> {
        let updated_at = encode_timestamp(&item.updated_at);

        let mutation = insert_or_update(
            CONTENT_TABLE,
            &["content_key", "content_value", "updated_at", "updated_by"],
            &[&item.key, &item.value, &updated_at, &item.updated_by],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert content to Spanner")?;

        tracing::debug!("Upserted content with key: {}", item.key);
        Ok(())
    }

    async fn list_content(&self) -> Result<Vec<ContentItem>> {
        let statement = Statement::new(
            "SELECT content_key, content_value, updated_at, updated_by FROM site_content ORDER BY content_key ASC"
        );

        let items = self
            .query_rows(statement)
            .await?
            .iter()
            .map(content_from_row)
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Listed {} content items", items.len());
        Ok(items)
    }

    async fn read_content(&self, key: &str) -> Result<Option<ContentItem>> {
        let mut statement = Statement::new(
            "SELECT content_key, content_value, updated_at, updated_by FROM site_content WHERE content_key = @key"
        );
        statement.add_param("key", &key.to_string());

        match self.query_rows(statement).await?.first() {
            Some(row) => {
                tracing::debug!("Read content with key: {}", key);
                content_from_row(row).map(Some)
            }
            None => {
                tracing::debug!("Content not found with key: {}", key);
                Ok(None)
            }
        }
    }

    async fn insert_status_check(&self, check: &StatusCheck) -> Result<()> {
        let checked_at = encode_timestamp(&check.timestamp);

        let mutation = insert_or_update(
            STATUS_TABLE,
            &["id", "client_name", "checked_at"],
            &[&check.id, &check.client_name, &checked_at],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert status check to Spanner")?;

        tracing::debug!("Inserted status check with id: {}", check.id);
        Ok(())
    }

    async fn list_status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>> {
        let mut statement = Statement::new(
            "SELECT id, client_name, checked_at FROM status_checks ORDER BY checked_at DESC LIMIT @limit"
        );
        statement.add_param("limit", &(limit as i64));

        self.query_rows(statement)
            .await?
            .iter()
            .map(|row| -> Result<StatusCheck> {
                let checked_at: String = row.column_by_name("checked_at")?;
                Ok(StatusCheck {
                    id: row.column_by_name("id")?,
                    client_name: row.column_by_name("client_name")?,
                    timestamp: parse_timestamp(&checked_at, "checked_at")?,
                })
            })
            .collect()
    }

    /// Lightweight `SELECT 1` proving the connection is alive
    async fn health_check(&self) -> Result<()> {
        let rows = self
            .query_rows(Statement::new("SELECT 1"))
            .await
            .context("Failed to execute health check query")?;

        if rows.is_empty() {
            Err(anyhow::anyhow!("Health check query returned no results"))
        } else {
            tracing::debug!("Health check query succeeded");
            Ok(())
        }
    }
}

/// Automatically provision Spanner instance, database, and tables
///
/// Checks whether the configured resources exist and creates them if needed,
/// so local development against the emulator needs no setup.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_tables_exist(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Ensure the Spanner instance exists, creating it if necessary
async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

/// Ensure the Spanner database exists, creating it if necessary
async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

/// Names of the tables in `TABLES` that the DDL does not create yet
fn missing_tables(ddl_statements: &[String]) -> Vec<&'static str> {
    TABLES
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| {
            let plain = format!("CREATE TABLE {} ", name);
            let quoted = format!("CREATE TABLE `{}`", name);
            !ddl_statements
                .iter()
                .any(|stmt| stmt.contains(&plain) || stmt.contains(&quoted))
        })
        .collect()
}

/// Ensure every table this service uses exists, creating missing ones
async fn ensure_tables_exist(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let missing = missing_tables(&ddl_response.into_inner().statements);
    if missing.is_empty() {
        tracing::info!("All tables already exist");
        return Ok(());
    }

    tracing::info!("Creating missing tables: {:?}", missing);

    let statements = TABLES
        .iter()
        .filter(|(name, _)| missing.contains(name))
        .map(|(_, ddl)| ddl.trim().to_string())
        .collect();

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements,
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create tables")?;

    tracing::info!("Tables created successfully: {:?}", missing);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentRepository;

    fn emulator_config(instance: &str) -> SpannerConfig {
        unsafe {
            std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
        }

        SpannerConfig {
            emulator_host: Some("localhost:9010".to_string()),
            project: "test-project".to_string(),
            instance: instance.to_string(),
            database: format!("{}-db", instance),
        }
    }

    #[test]
    fn test_store_is_clonable_and_send_sync() {
        fn assert_shareable<T: Clone + Send + Sync>() {}
        assert_shareable::<SpannerStore>();
    }

    #[test]
    fn test_missing_tables_detection() {
        assert_eq!(missing_tables(&[]), vec![CONTENT_TABLE, STATUS_TABLE]);

        let existing = vec![TABLES[0].1.trim().to_string()];
        assert_eq!(missing_tables(&existing), vec![STATUS_TABLE]);

        let quoted = vec![
            "CREATE TABLE `site_content` (\n  content_key STRING(MAX) NOT NULL\n) PRIMARY KEY(content_key)".to_string(),
            "CREATE TABLE status_checks (\n  id STRING(36) NOT NULL\n) PRIMARY KEY(id)".to_string(),
        ];
        assert!(missing_tables(&quoted).is_empty());
    }

    #[test]
    fn test_timestamp_encoding_round_trips() {
        let now = Utc::now();
        let encoded = encode_timestamp(&now);
        assert!(encoded.ends_with('Z'));

        let parsed = parse_timestamp(&encoded, "updated_at").unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator on localhost:9010"]
    async fn test_auto_provisioning_idempotent() {
        let config = emulator_config("idempotent-test-instance");

        SpannerStore::from_config(&config).await.unwrap();
        SpannerStore::from_config(&config).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator on localhost:9010"]
    async fn test_content_upsert_and_read() {
        let config = emulator_config("content-test-instance");
        let store = SpannerStore::from_config(&config).await.unwrap();
        let repo = ContentRepository::new(Arc::new(store.clone()));

        let key = format!("site_title_{}", uuid::Uuid::new_v4());
        repo.upsert(&key, "Welcome", "admin@example.com").await.unwrap();
        assert_eq!(repo.get_by_key(&key).await, Some("Welcome".to_string()));

        repo.upsert(&key, "Welcome back", "admin@example.com").await.unwrap();
        let stored = store.read_content(&key).await.unwrap().unwrap();
        assert_eq!(stored.value, "Welcome back");
        assert_eq!(stored.updated_by, "admin@example.com");

        let all = repo.get_all().await;
        assert_eq!(all.get(&key).map(String::as_str), Some("Welcome back"));

        assert_eq!(repo.get_by_key("never-written-key").await, None);
    }

    #[tokio::test]
    #[ignore = "requires the Spanner emulator on localhost:9010"]
    async fn test_status_checks_and_health() {
        let config = emulator_config("status-test-instance");
        let store = SpannerStore::from_config(&config).await.unwrap();

        store.health_check().await.unwrap();

        let check = StatusCheck {
            id: uuid::Uuid::new_v4().to_string(),
            client_name: "emulator test".to_string(),
            timestamp: Utc::now(),
        };
        store.insert_status_check(&check).await.unwrap();

        let checks = store.list_status_checks(1000).await.unwrap();
        assert!(checks.iter().any(|c| c.id == check.id));
    }
}
