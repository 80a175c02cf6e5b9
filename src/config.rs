use std::env;
use anyhow::{bail, Context, Result};

/// Longest session token lifetime accepted from the environment (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Which persistence layer backs the content store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Spanner(SpannerConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

/// The single principal allowed to edit site content
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

// Keep the password out of debug output and logs.
impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub service_port: u16,
    pub service_host: String,
    pub admin: AdminCredentials,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("storage", &self.storage)
            .field("service_port", &self.service_port)
            .field("service_host", &self.service_host)
            .field("admin", &self.admin)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "spanner".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "spanner" => StorageBackend::Spanner(spanner_from_env()?),
            "memory" => StorageBackend::Memory,
            other => bail!("STORAGE_BACKEND must be 'spanner' or 'memory', got '{}'", other),
        };

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let admin_email = env::var("ADMIN_EMAIL")
            .context("ADMIN_EMAIL environment variable is required")?;

        let admin_password = env::var("ADMIN_PASSWORD")
            .context("ADMIN_PASSWORD environment variable is required")?;

        let jwt_secret = env::var("JWT_SECRET")
            .context("JWT_SECRET environment variable is required")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .ok()
            .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
            .with_context(|| {
                format!("TOKEN_TTL_HOURS must be between 1 and {} hours", MAX_TOKEN_TTL_HOURS)
            })?;

        Ok(Config {
            storage,
            service_port,
            service_host,
            admin: AdminCredentials {
                email: admin_email,
                password: admin_password,
            },
            jwt_secret,
            token_ttl_hours,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.storage {
            StorageBackend::Spanner(spanner) => {
                tracing::info!("  Storage backend: spanner");
                tracing::info!("  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
                tracing::info!("  Spanner project: {}", spanner.project);
                tracing::info!("  Spanner instance: {}", spanner.instance);
                tracing::info!("  Spanner database: {}", spanner.database);
            }
            StorageBackend::Memory => {
                tracing::info!("  Storage backend: memory (content is lost on restart)");
            }
        }
        tracing::info!("  Admin identity: {}", self.admin.email);
        tracing::info!("  Session token lifetime: {}h", self.token_ttl_hours);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn spanner_from_env() -> Result<SpannerConfig> {
    let emulator_host = env::var("SPANNER_EMULATOR_HOST").ok();

    let project = env::var("SPANNER_PROJECT")
        .context("SPANNER_PROJECT environment variable is required")?;

    let instance = env::var("SPANNER_INSTANCE")
        .context("SPANNER_INSTANCE environment variable is required")?;

    let database = env::var("SPANNER_DATABASE")
        .context("SPANNER_DATABASE environment variable is required")?;

    Ok(SpannerConfig {
        emulator_host,
        project,
        instance,
        database,
    })
}
