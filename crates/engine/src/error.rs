// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use falcon_adapters::TransportError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from building or registering a client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("falcon is already initialized for this process")]
    AlreadyInitialized,
    #[error("failed to start delivery worker: {0}")]
    Worker(#[source] std::io::Error),
}
