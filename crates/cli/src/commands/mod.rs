// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod capture;
pub mod demo;
pub mod heartbeat;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use falcon_engine::ClientOptions;

use crate::exit_error::ExitError;

/// How long a command waits for the delivery queue before giving up.
pub const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where client options come from: an optional TOML file, then
/// `FALCON_*` environment variables, then `--debug`.
pub struct OptionsSource {
    pub config: Option<PathBuf>,
    pub debug: bool,
}

impl OptionsSource {
    pub fn load(&self) -> Result<ClientOptions> {
        let mut options = match &self.config {
            Some(path) => ClientOptions::load(path)
                .with_context(|| format!("loading {}", path.display()))?
                .with_env_overrides(),
            None => ClientOptions::from_env(),
        };
        if self.debug {
            options.debug = true;
        }
        Ok(options)
    }

    /// Options that must be able to reach the ingest API.
    pub fn load_validated(&self) -> Result<ClientOptions> {
        let options = self.load()?;
        options.validate().map_err(|e| ExitError::config(e.to_string()))?;
        Ok(options)
    }
}

/// Parse a `key=value` argument. Values that parse as JSON (numbers,
/// booleans) keep their type; anything else is a string.
pub fn parse_key_value(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = match serde_json::from_str::<serde_json::Value>(value) {
        Ok(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => v,
        _ => serde_json::Value::String(value.to_string()),
    };
    Ok((key.to_string(), value))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
