// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `falcon heartbeat`

use anyhow::Result;
use clap::Args;
use falcon_core::{DataMap, HeartbeatStatus};
use falcon_engine::Client;

use super::{parse_key_value, OptionsSource, FLUSH_TIMEOUT};
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct HeartbeatArgs {
    /// Job slug, e.g. `daily-backup`
    pub slug: String,
    /// Run outcome: ok or error
    #[arg(long, default_value = "ok")]
    pub status: HeartbeatStatus,
    /// Run duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,
    /// Metadata entry (repeatable)
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub meta: Vec<(String, serde_json::Value)>,
}

pub async fn handle(args: HeartbeatArgs, source: &OptionsSource) -> Result<()> {
    let client = Client::with_http(source.load_validated()?)?;
    let metadata: DataMap = args.meta.into_iter().collect();

    let delivered = client.heartbeat_async(&args.slug, args.status, args.duration_ms, metadata).await;
    client.shutdown(FLUSH_TIMEOUT);

    if !delivered {
        return Err(ExitError::delivery(format!("heartbeat for '{}' was not delivered", args.slug)).into());
    }
    println!("heartbeat {} {} sent", args.slug, args.status);
    Ok(())
}
