// src/core/config_manager.rs
//! Dashboard configuration, resolved once at startup and injected into the
//! API client and the server.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8100";
pub const DEFAULT_PAGE_SIZE: u64 = 500;
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
pub const DEFAULT_FEED_LIMIT: u32 = 50;
pub const DEFAULT_MAX_PAGES: u32 = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8200;

/// Upper bounds the backend enforces on `limit` query parameters.
pub const MAX_HISTORY_LIMIT: u32 = 52;
pub const MAX_PAGE_SIZE: u64 = 500;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub page_size: u64,
    pub history_limit: u32,
    pub feed_limit: u32,
    pub max_pages: u32,
    pub port: u16,
}

/// One environment section of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigSection {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    page_size: Option<u64>,
    history_limit: Option<u32>,
    feed_limit: Option<u32>,
    max_pages: Option<u32>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigSection,
    #[serde(default)]
    production: ConfigSection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            feed_limit: DEFAULT_FEED_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment and `./config.yaml`.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading dashboard configuration for environment: {}", environment);

        let config_path = PathBuf::from(CONFIG_FILE);
        let file = config_path.exists().then_some(config_path.as_path());
        let env_url = std::env::var("OPENROLES_API_URL").ok();

        Self::load_from(file, &environment, env_url)
    }

    fn get_environment() -> String {
        std::env::var("OPENROLES_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Resolve configuration from explicit inputs. Precedence for the base URL:
    /// `env_url`, then the file section, then the localhost default.
    pub fn load_from(
        config_file: Option<&Path>,
        environment: &str,
        env_url: Option<String>,
    ) -> Result<Self> {
        let section = match config_file {
            Some(path) => Self::read_section(path, environment)?,
            None => ConfigSection::default(),
        };

        let defaults = Self::default();
        let api_base_url = env_url
            .filter(|url| !url.trim().is_empty())
            .or(section.api_base_url)
            .unwrap_or(defaults.api_base_url);

        let config = Self {
            api_base_url: normalize_base_url(&api_base_url),
            request_timeout_secs: section
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            page_size: section
                .page_size
                .unwrap_or(defaults.page_size)
                .clamp(1, MAX_PAGE_SIZE),
            history_limit: section
                .history_limit
                .unwrap_or(defaults.history_limit)
                .clamp(1, MAX_HISTORY_LIMIT),
            feed_limit: section.feed_limit.unwrap_or(defaults.feed_limit).max(1),
            max_pages: section.max_pages.unwrap_or(defaults.max_pages).max(1),
            port: section.port.unwrap_or(defaults.port),
        };

        debug!("Resolved dashboard configuration: {:?}", config);
        Ok(config)
    }

    fn read_section(path: &Path, environment: &str) -> Result<ConfigSection> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
