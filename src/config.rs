//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (prefix: BOOKINGS_, nested keys split on "__")
//! 2. Current working directory: ./config.toml
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,

    /// Template pipeline configuration
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            templates: TemplatesConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    #[serde(default = "default_name")]
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment (development, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            port: default_port(),
            log_level: default_log_level(),
            environment: default_environment(),
        }
    }
}

/// Template pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding `*.page.html` and `*.layout.html` sources
    #[serde(default = "default_template_root")]
    pub root: PathBuf,

    /// Compile templates once at startup (production) instead of per
    /// request (development)
    #[serde(default = "default_false")]
    pub use_cache: bool,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: default_template_root(),
            use_cache: default_false(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session cookie name
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session expiry in seconds; `0` means the cookie expires when the
    /// browser closes
    #[serde(default = "default_expiry_secs")]
    pub expiry_secs: u64,

    /// Secure cookie flag (HTTPS only); should be `true` in production
    #[serde(default = "default_true")]
    pub secure: bool,

    /// HttpOnly cookie flag
    #[serde(default = "default_true")]
    pub http_only: bool,

    /// SameSite cookie policy ("strict", "lax", or "none")
    #[serde(default = "default_same_site")]
    pub same_site: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expiry_secs: default_expiry_secs(),
            secure: default_true(),
            http_only: default_true(),
            same_site: default_same_site(),
        }
    }
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Reads `./config.toml` if present; environment variables (BOOKINGS_
    /// prefix) override all file-based values.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the working-directory lookup and loads directly from the
    /// given path. Useful for testing or non-standard deployments.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Load from config file (if exists)
            .merge(Toml::file(path))
            // Override with environment variables
            .merge(Env::prefixed("BOOKINGS_").split("__"))
            .extract()?;

        Ok(config)
    }
}

// Default value functions
fn default_name() -> String {
    "bookings".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_template_root() -> PathBuf {
    PathBuf::from("./templates")
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_expiry_secs() -> u64 {
    86400 // 24 hours
}

fn default_same_site() -> String {
    "lax".to_string()
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}
