//! Runtime configuration for the business layer.
//!
//! Defaults are chosen at compile time by the `env_*` cargo features; deployments can
//! override them through `SPHERE_*` environment variables.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Rows requested per page of the users table.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Per-request timeout applied by the API gateway client on native targets.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(String),
    #[error("SPHERE_PAGE_SIZE must be greater than zero")]
    ZeroPageSize,
    #[error("SPHERE_REQUEST_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Backend root, without a trailing slash (e.g. `https://chat.example.com/api`).
    pub api_base_url: String,
    pub page_size: u32,
    pub request_timeout: Duration,
}

/// Environment overrides, read from `SPHERE_*` variables.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    sphere_api_base_url: Option<String>,
    sphere_page_size: Option<u32>,
    sphere_request_timeout_secs: Option<u64>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Builds the config from compile-time defaults plus process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw: RawConfig =
            serde_env::from_iter(std::env::vars()).map_err(|e| ConfigError::Env(e.to_string()))?;
        Self::default().apply(raw)
    }

    fn apply(mut self, raw: RawConfig) -> Result<Self, ConfigError> {
        if let Some(url) = raw.sphere_api_base_url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = normalize_base_url(url);
        }
        if let Some(page_size) = raw.sphere_page_size {
            if page_size == 0 {
                return Err(ConfigError::ZeroPageSize);
            }
            self.page_size = page_size;
        }
        if let Some(secs) = raw.sphere_request_timeout_secs {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
            self.request_timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Joins an endpoint path (e.g. `/User/GetSystemStats`) onto the base URL.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: if cfg!(target_arch = "wasm32") {
                // Same-origin deployment behind the panel's reverse proxy.
                "/api".to_owned()
            } else if cfg!(feature = "env_test") {
                "https://chat-test.reactosphere.app/api".to_owned()
            } else if cfg!(feature = "env_internal") {
                "https://chat-internal.reactosphere.app/api".to_owned()
            } else if cfg!(feature = "env_nightly") {
                "https://chat-nightly.reactosphere.app/api".to_owned()
            } else {
                "https://chat.reactosphere.app/api".to_owned()
            },
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn normalize_base_url(url: String) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.len() == url.len() {
        url
    } else {
        trimmed.to_owned()
    }
}
