//! Configuration management for the Backoffice server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection URL. An empty string selects the in-memory
    /// engine (development fallback, nothing is persisted).
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Default admin account created at startup when no user carries its name.
#[derive(Debug, Deserialize, Clone)]
pub struct BootstrapConfig {
    pub admin_username: String,
    pub admin_email: String,
    /// Leave unset to skip bootstrapping entirely.
    pub admin_password: Option<String>,
}

/// Credentials for the external CRM providers queried by the dashboard
/// overview. Providers without credentials report a failure, which the
/// overview isolates.
#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    pub hubspot_api_key: Option<String>,
    pub hubspot_oauth_token: Option<String>,
    pub pipedrive_api_token: Option<String>,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub crm: CrmConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BACKOFFICE_)
            .add_source(
                Environment::with_prefix("BACKOFFICE")
                    .separator("_")
                    .try_parsing(true),
            )
            // Conventional env vars take precedence over config files
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("crm.hubspot_api_key", env::var("HUBSPOT_API_KEY").ok())?
            .set_override_option("crm.hubspot_oauth_token", env::var("HUBSPOT_OAUTH_TOKEN").ok())?
            .set_override_option("crm.pipedrive_api_token", env::var("PIPEDRIVE_API_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: None,
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            hubspot_api_key: None,
            hubspot_oauth_token: None,
            pipedrive_api_token: None,
            request_timeout_secs: 10,
        }
    }
}
