// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automatic breadcrumbs for host capabilities.
//!
//! The host passes its HTTP client, database driver or log sink through a
//! wrapping constructor ([`Instrumentation::http`], [`Instrumentation::db`],
//! [`Instrumentation::log`]). The wrapper consults the shared hook table on
//! every call: while a capability is installed its calls become breadcrumbs
//! on the calling context, otherwise they pass straight through.
//! Capabilities never passed through a wrapper are not observed.

mod db;
mod http;
mod log;
pub mod sanitize;

pub use db::InstrumentedDb;
pub use http::InstrumentedHttp;
pub use log::InstrumentedLog;

use falcon_core::Breadcrumb;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Level;

use crate::context::ExecutionContext;
use crate::reentrancy::{self, ReentrancyGuard};

/// Default cap on recorded message and string data lengths.
pub const DEFAULT_MAX_LEN: usize = 1024;

/// A host capability that can be instrumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    HttpClient,
    DbDriver,
    LogSink,
}

falcon_core::simple_display! {
    Capability {
        HttpClient => "http_client",
        DbDriver => "db_driver",
        LogSink => "log_sink",
    }
}

impl Capability {
    pub const ALL: [Capability; 3] = [Capability::HttpClient, Capability::DbDriver, Capability::LogSink];
}

/// Per-capability recording options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Messages and string data values are truncated to this many characters.
    pub max_len: usize,
    /// Least severe log level recorded by the log sink hook.
    pub min_level: Level,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self { max_len: DEFAULT_MAX_LEN, min_level: Level::INFO }
    }
}

impl HookConfig {
    falcon_core::setters! {
        set {
            max_len: usize,
            min_level: Level,
        }
    }
}

/// Process-wide hook table.
///
/// Cloning shares the table: every wrapper built from a clone sees installs
/// and uninstalls made through any other clone.
#[derive(Clone, Default)]
pub struct Instrumentation {
    hooks: Arc<RwLock<HashMap<Capability, HookConfig>>>,
}

impl Instrumentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a hook. Idempotent: installing again only replaces the
    /// config. Returns `true` when the capability was not installed before.
    pub fn install(&self, capability: Capability, config: HookConfig) -> bool {
        let fresh = self.hooks.write().insert(capability, config).is_none();
        if fresh {
            tracing::debug!(%capability, "instrumentation installed");
        }
        fresh
    }

    /// Install every capability with the same config.
    pub fn install_all(&self, config: HookConfig) {
        for capability in Capability::ALL {
            self.install(capability, config.clone());
        }
    }

    pub fn uninstall(&self, capability: Capability) -> bool {
        let removed = self.hooks.write().remove(&capability).is_some();
        if removed {
            tracing::debug!(%capability, "instrumentation removed");
        }
        removed
    }

    pub fn is_installed(&self, capability: Capability) -> bool {
        self.hooks.read().contains_key(&capability)
    }

    pub fn config(&self, capability: Capability) -> Option<HookConfig> {
        self.hooks.read().get(&capability).cloned()
    }

    pub fn installed(&self) -> Vec<Capability> {
        Capability::ALL.into_iter().filter(|c| self.is_installed(*c)).collect()
    }

    pub fn http<H>(&self, inner: H) -> InstrumentedHttp<H> {
        InstrumentedHttp::new(inner, self.clone())
    }

    pub fn db<D>(&self, inner: D) -> InstrumentedDb<D> {
        InstrumentedDb::new(inner, self.clone())
    }

    pub fn log<L>(&self, inner: L) -> InstrumentedLog<L> {
        InstrumentedLog::new(inner, self.clone())
    }

    /// Config to record with, or `None` when this call should pass through.
    pub(crate) fn active(&self, capability: Capability) -> Option<HookConfig> {
        if reentrancy::is_recording() {
            return None;
        }
        self.config(capability)
    }
}

impl std::fmt::Debug for Instrumentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrumentation").field("installed", &self.installed()).finish()
    }
}

/// Record a hook breadcrumb under the reentrancy guard.
pub(crate) fn record(ctx: &mut ExecutionContext, config: &HookConfig, breadcrumb: Breadcrumb) {
    let Some(_guard) = ReentrancyGuard::try_enter() else {
        return;
    };
    ctx.add_breadcrumb(breadcrumb.truncated(config.max_len));
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
