// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// API key: `FALCON_API_KEY`
pub fn api_key() -> Option<String> {
    non_empty("FALCON_API_KEY")
}

pub fn app_name() -> Option<String> {
    non_empty("FALCON_APP_NAME")
}

/// Ingest base URL: `FALCON_API_URL`
pub fn api_url() -> Option<String> {
    non_empty("FALCON_API_URL")
}

/// Deployment environment: `FALCON_ENVIRONMENT` > `ENVIRONMENT`
pub fn environment() -> Option<String> {
    non_empty("FALCON_ENVIRONMENT").or_else(|| non_empty("ENVIRONMENT"))
}

/// `FALCON_DEBUG` accepts `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`.
pub fn debug() -> Option<bool> {
    non_empty("FALCON_DEBUG").and_then(|s| match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

pub fn max_breadcrumbs() -> Option<usize> {
    non_empty("FALCON_MAX_BREADCRUMBS").and_then(|s| s.parse::<usize>().ok())
}

pub fn queue_capacity() -> Option<usize> {
    non_empty("FALCON_QUEUE_CAPACITY").and_then(|s| s.parse::<usize>().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
