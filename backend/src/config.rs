//! Configuration for the academy backend.

use std::time::Duration;

use academy_common::widgets::FeedbackOptions;
use academy_common::CourseStatus;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    /// OIDC provider. Without it every visitor is anonymous.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// Sandbox API. Without it the sandbox routes are unavailable.
    #[serde(default)]
    pub sandbox: Option<SandboxConfig>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute origin prefixed to every sitemap link (no trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    /// HTTP endpoint of the Neo4j server, e.g. http://localhost:7474
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,
    #[serde(default = "default_neo4j_database")]
    pub database: String,
    #[serde(default = "default_neo4j_username")]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            database: default_neo4j_database(),
            username: default_neo4j_username(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// OIDC issuer URL for JWT validation
    pub issuer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SandboxConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Course statuses kept out of public listings.
    #[serde(default = "default_negative_statuses")]
    pub negative_statuses: Vec<CourseStatus>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            negative_statuses: default_negative_statuses(),
        }
    }
}

/// Options handed to the feedback widget.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackConfig {
    /// Seconds before the thank-you message is removed. Unset keeps it.
    #[serde(default)]
    pub auto_hide_secs: Option<u64>,
}

impl FeedbackConfig {
    /// Options handed to the browser feedback card.
    pub fn widget_options(&self) -> FeedbackOptions {
        FeedbackOptions {
            auto_hide: self.auto_hide_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or "*"
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_base_url() -> String {
    "https://graphacademy.neo4j.com".to_string()
}
fn default_neo4j_uri() -> String {
    "http://localhost:7474".to_string()
}
fn default_neo4j_database() -> String {
    "neo4j".to_string()
}
fn default_neo4j_username() -> String {
    "neo4j".to_string()
}
fn default_negative_statuses() -> Vec<CourseStatus> {
    vec![CourseStatus::Disabled, CourseStatus::Draft, CourseStatus::Test]
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_cors_origins() -> String {
    "*".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (ACADEMY__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_loader(
            ConfigLoader::builder()
                .add_source(File::with_name("config").required(false))
                .add_source(
                    Environment::with_prefix("ACADEMY")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_loader(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let config = builder
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .build()?;

        config.try_deserialize()
    }
}
