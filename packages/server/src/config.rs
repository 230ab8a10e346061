use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Require TLS when talking to the database. Disable for a local server.
    pub tls: bool,
}

impl DatabaseConfig {
    /// Connection URL with the TLS flag applied as `sslmode`.
    ///
    /// An `sslmode` already present in `url` wins over the flag.
    pub fn connection_url(&self) -> String {
        if self.url.contains("sslmode=") {
            return self.url.clone();
        }
        let mode = if self.tls { "require" } else { "disable" };
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}sslmode={mode}", self.url)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Webhook that is told about new resources. `None` disables notifications.
    pub webhook_url: Option<String>,
    /// Public address of the frontend, mentioned in notification messages.
    pub frontend_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            frontend_url: "http://localhost:3000".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Load configuration. `server.port` has no default, so a deployment that
    /// forgets to set it fails here instead of listening somewhere unexpected.
    pub fn load() -> Result<Self, ConfigError> {
        let s = Self::builder()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., RESOURCES__DATABASE__URL)
            .add_source(
                Environment::with_prefix("RESOURCES")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Builder holding the built-in defaults, before any file or environment source.
    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.tls", true)?
            .set_default("notifications.frontend_url", "http://localhost:3000")
    }
}
