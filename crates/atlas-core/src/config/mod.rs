//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `ATLAS_`-prefixed environment variables. Each sub-module
//! represents a logical configuration section.

pub mod admin;
pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod suggestions;

use serde::{Deserialize, Serialize};

pub use self::admin::AdminConfig;
pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::suggestions::SuggestionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Every section has defaults, so an empty source set yields a usable
/// development configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Metadata suggestion client settings.
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    /// Startup admin account.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, an environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with
    /// `ATLAS_` (sections separated by `__`). The unprefixed deployment
    /// variables (`SECRET_KEY`, `DATABASE_URL`, `METADATA_API`, `ADMIN_*`)
    /// are applied last.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ATLAS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let mut config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply the unprefixed deployment variables through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(secret) = lookup("SECRET_KEY") {
            self.auth.secret_key = secret;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(base) = lookup("METADATA_API") {
            self.suggestions.base_url = base;
        }
        if let Some(email) = lookup("ADMIN_EMAIL") {
            self.admin.email = Some(email);
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.admin.password = Some(password);
        }
        if let Some(username) = lookup("ADMIN_USERNAME") {
            self.admin.username = username;
        }
    }
}
