//! Configuration management for billed
//!
//! This module handles loading, validation, and management of
//! billed configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
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

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Bill store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend serves bill records
    #[serde(default)]
    pub kind: StoreKind,
    /// Base URL of the remote REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent to the remote backend
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout for the remote backend, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5678".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Store backend enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process store seeded with sample bills
    Memory,
    /// Remote REST backend
    Remote,
}

impl Default for StoreKind {
    fn default() -> Self {
        StoreKind::Memory
    }
}

impl std::str::FromStr for StoreKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreKind::Memory),
            "remote" => Ok(StoreKind::Remote),
            _ => Err(format!("Invalid store kind: {}", s)),
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Remote => write!(f, "remote"),
        }
    }
}

/// Connected user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// User role
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    /// User e-mail, stamped on new bills
    #[serde(default = "default_email")]
    pub email: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            user_type: UserType::default(),
            email: default_email(),
        }
    }
}

fn default_email() -> String {
    "employee@test.tld".to_string()
}

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Employee,
    Admin,
}

impl Default for UserType {
    fn default() -> Self {
        UserType::Employee
    }
}

impl std::str::FromStr for UserType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" => Ok(UserType::Employee),
            "admin" => Ok(UserType::Admin),
            _ => Err(format!("Invalid user type: {}", s)),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Employee => write!(f, "employee"),
            UserType::Admin => write!(f, "admin"),
        }
    }
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Language used for dates and status labels
    #[serde(default)]
    pub locale: Locale,
}

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fr
    }
}

impl std::str::FromStr for Locale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fr" => Ok(Locale::Fr),
            "en" => Ok(Locale::En),
            _ => Err(format!("Invalid locale: {}", s)),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::Fr => write!(f, "fr"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
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

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Bill store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Connected user
    #[serde(default)]
    pub user: UserConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.store.kind == StoreKind::Remote
            && !(self.store.base_url.starts_with("http://") || self.store.base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "store.base_url".to_string(),
                reason: "Remote store needs an http:// or https:// base URL".to_string(),
            });
        }

        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.user.email.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "user.email".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// ==================== Tests ====================
