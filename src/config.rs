//! Configuration management for the LMS server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request, in seconds
    pub request_timeout_secs: u64,
}

/// Which document store backs the server
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    /// In-process store seeded from a JSON fixture
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CollectionsConfig {
    pub books: String,
    pub students: String,
    pub borrows: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub uri: String,
    pub name: String,
    /// Fixture file for the memory backend
    pub fixture_path: Option<PathBuf>,
    pub collections: CollectionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Student photo URLs
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PhotosConfig {
    /// Prefix for relative image paths stored on student records
    pub base_url: String,
    pub male_placeholder: String,
    pub female_placeholder: String,
    pub default_placeholder: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub photos: PhotosConfig,
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
            // Add environment variables (e.g. LMS_SERVER__PORT=9000)
            .add_source(
                Environment::with_prefix("LMS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override database URI from MONGODB_URI env var if present
            .set_override_option("database.uri", env::var("MONGODB_URI").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            books: "books".to_string(),
            students: "students".to_string(),
            borrows: "borrows".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            uri: "mongodb://localhost:27017".to_string(),
            name: "lms".to_string(),
            fixture_path: None,
            collections: CollectionsConfig::default(),
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

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            base_url: "/uploads/students".to_string(),
            male_placeholder: "/assets/img/avatar-male.png".to_string(),
            female_placeholder: "/assets/img/avatar-female.png".to_string(),
            default_placeholder: "/assets/img/avatar.png".to_string(),
        }
    }
}
