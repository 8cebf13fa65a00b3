// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.
//!
//! Options come from code (builder setters), a `falcon.toml` file, or the
//! environment. Environment values win over file values.

use falcon_core::{Breadcrumb, DEFAULT_MAX_BREADCRUMBS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::env;

pub const DEFAULT_API_URL: &str = "https://api.falcon.roselabs.io";
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Callback that may rewrite a breadcrumb before it is stored, or drop it by
/// returning `None`.
pub type BeforeBreadcrumb = Arc<dyn Fn(Breadcrumb) -> Option<Breadcrumb> + Send + Sync>;

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api_key is required (set FALCON_API_KEY or api_key in falcon.toml)")]
    MissingApiKey,
    #[error("api_url must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),
    #[error("queue_capacity must be at least 1")]
    ZeroQueueCapacity,
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    pub api_key: String,
    pub app_name: String,
    pub environment: String,
    pub api_url: String,
    /// Log delivery problems at `warn` instead of `debug`.
    pub debug: bool,
    pub max_breadcrumbs: usize,
    pub queue_capacity: usize,
    /// Append a captured backtrace to the stack of every captured error.
    pub attach_backtrace: bool,
    #[serde(skip)]
    pub before_breadcrumb: Option<BeforeBreadcrumb>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            app_name: String::new(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            debug: false,
            max_breadcrumbs: DEFAULT_MAX_BREADCRUMBS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            attach_backtrace: false,
            before_breadcrumb: None,
        }
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &redact(&self.api_key))
            .field("app_name", &self.app_name)
            .field("environment", &self.environment)
            .field("api_url", &self.api_url)
            .field("debug", &self.debug)
            .field("max_breadcrumbs", &self.max_breadcrumbs)
            .field("queue_capacity", &self.queue_capacity)
            .field("attach_backtrace", &self.attach_backtrace)
            .field("before_breadcrumb", &self.before_breadcrumb.is_some())
            .finish()
    }
}

fn redact(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{}…", falcon_core::short(key, 6))
    }
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Self::default() }
    }

    falcon_core::setters! {
        into {
            api_key: String,
            app_name: String,
            environment: String,
            api_url: String,
        }
        set {
            debug: bool,
            max_breadcrumbs: usize,
            queue_capacity: usize,
            attach_backtrace: bool,
        }
    }

    pub fn before_breadcrumb(
        mut self,
        f: impl Fn(Breadcrumb) -> Option<Breadcrumb> + Send + Sync + 'static,
    ) -> Self {
        self.before_breadcrumb = Some(Arc::new(f));
        self
    }

    /// Defaults overridden by `FALCON_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read a `falcon.toml` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
    }

    /// Replace every value that has an environment variable set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env::api_key() {
            self.api_key = v;
        }
        if let Some(v) = env::app_name() {
            self.app_name = v;
        }
        if let Some(v) = env::api_url() {
            self.api_url = v;
        }
        if let Some(v) = env::environment() {
            self.environment = v;
        }
        if let Some(v) = env::debug() {
            self.debug = v;
        }
        if let Some(v) = env::max_breadcrumbs() {
            self.max_breadcrumbs = v;
        }
        if let Some(v) = env::queue_capacity() {
            self.queue_capacity = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        let scheme_ok = self.api_url.starts_with("https://") || self.api_url.starts_with("http://");
        let host = self.api_url.split_once("://").map(|(_, rest)| rest).unwrap_or_default();
        if !scheme_ok || host.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
