//! Configuration loading for the reviewer.
//!
//! Layered config, later sources win:
//! defaults -> config file -> `--config` file -> env vars (REVIEW_*) -> CLI flags.
//! The default config file lives at ~/.config/empathetic-review/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ReviewError;

/// Value shipped in sample `.env` files; treated as "not set".
pub const PLACEHOLDER_API_KEY: &str = "your_actual_gemini_api_key_here";

/// Legacy environment variable holding the provider credential.
const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Which hosted API serves embeddings and generations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint (generation only)
    Openai,
}

/// Generation/embedding provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub kind: ProviderKind,

    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model used for feedback and summary generation
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Model used for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// API key (loaded from env var, not stored in config file)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    /// Ask Gemini for a JSON mime type on feedback requests
    #[serde(default)]
    pub json_mode: bool,
}

fn default_generation_model() -> String {
    "gemini-pro".to_string()
}

fn default_embedding_model() -> String {
    "models/embedding-001".to_string()
}

fn default_provider_timeout() -> u64 {
    60
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: None,
            generation_model: default_generation_model(),
            embedding_model: default_embedding_model(),
            api_key: None,
            timeout_secs: default_provider_timeout(),
            json_mode: false,
        }
    }
}

/// Knowledge base configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// JSON file replacing the built-in catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Embedding dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_dimension() -> usize {
    768
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            dimension: default_dimension(),
        }
    }
}

impl KnowledgeSettings {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.dimension == 0 {
            return Err("dimension must be > 0".to_string());
        }
        Ok(())
    }
}

/// Review pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// How many comments of one request are processed at once
    #[serde(default = "default_max_concurrent_comments")]
    pub max_concurrent_comments: usize,

    /// Whole-request deadline in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_max_concurrent_comments() -> usize {
    4
}

fn default_request_timeout() -> u64 {
    120
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            max_concurrent_comments: default_max_concurrent_comments(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ReviewSettings {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_comments == 0 {
            return Err("max_concurrent_comments must be > 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub knowledge: KnowledgeSettings,

    #[serde(default)]
    pub review: ReviewSettings,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            provider: ProviderSettings::default(),
            knowledge: KnowledgeSettings::default(),
            review: ReviewSettings::default(),
        }
    }
}

fn config_error(e: config::ConfigError) -> ReviewError {
    ReviewError::Config(e.to_string())
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/empathetic-review/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (REVIEW_*, `__` between nested keys)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, ReviewError> {
        let config_dir = ProjectDirs::from("", "", "empathetic-review")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("host", default_host())
            .map_err(config_error)?
            .set_default("port", default_port() as i64)
            .map_err(config_error)?
            .set_default("log_level", default_log_level())
            .map_err(config_error)?
            .set_default("provider.generation_model", default_generation_model())
            .map_err(config_error)?
            .set_default("provider.embedding_model", default_embedding_model())
            .map_err(config_error)?
            .set_default("knowledge.dimension", default_dimension() as i64)
            .map_err(config_error)?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: REVIEW_PORT, REVIEW_PROVIDER__API_KEY, REVIEW_REVIEW__REQUEST_TIMEOUT_SECS
        builder = builder.add_source(
            Environment::with_prefix("REVIEW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .map_err(config_error)?
            .try_deserialize()
            .map_err(config_error)?;

        settings.knowledge.validate().map_err(ReviewError::Config)?;
        settings.review.validate().map_err(ReviewError::Config)?;
        Ok(settings)
    }

    /// Socket address string for the HTTP server
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolve the provider credential.
    ///
    /// `provider.api_key` wins, then `GEMINI_API_KEY`. Empty and placeholder
    /// values count as absent.
    pub fn resolve_api_key(&self) -> Result<SecretString, ReviewError> {
        let env_key = std::env::var(GEMINI_API_KEY_VAR).ok();
        pick_api_key(self.provider.api_key.as_deref(), env_key.as_deref())
            .map(|key| SecretString::from(key.to_string()))
            .ok_or_else(|| {
                ReviewError::MissingCredential(format!(
                    "set {GEMINI_API_KEY_VAR} (or REVIEW_PROVIDER__API_KEY) in the environment or a .env file"
                ))
            })
    }
}

fn pick_api_key<'a>(configured: Option<&'a str>, env: Option<&'a str>) -> Option<&'a str> {
    [configured, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
}
