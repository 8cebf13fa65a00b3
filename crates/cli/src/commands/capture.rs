// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `falcon capture`

use anyhow::Result;
use clap::Args;
use falcon_core::Breadcrumb;
use falcon_engine::{CaptureOptions, Client};

use super::{parse_key_value, OptionsSource, FLUSH_TIMEOUT};
use crate::exit_error::ExitError;

#[derive(Args)]
pub struct CaptureArgs {
    /// Event message
    pub message: String,
    /// Tag attached to the event (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub tags: Vec<(String, serde_json::Value)>,
}

/// Build the call-site options for a test event. Tag values are sent as
/// strings whatever they parsed as.
pub fn capture_options(tags: Vec<(String, serde_json::Value)>) -> CaptureOptions {
    tags.into_iter().fold(CaptureOptions::new().tag("source", "falcon-cli"), |opts, (k, v)| {
        let value = match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        opts.tag(k, value)
    })
}

pub fn handle(args: CaptureArgs, source: &OptionsSource) -> Result<()> {
    let client = Client::with_http(source.load_validated()?)?;
    let mut ctx = client.context();
    ctx.add_breadcrumb(Breadcrumb::custom("falcon capture").category("cli"));

    let event_id = client.capture_message(&ctx, &args.message, capture_options(args.tags));
    if !client.shutdown(FLUSH_TIMEOUT) {
        return Err(ExitError::delivery(format!("event {event_id} still queued after timeout")).into());
    }
    println!("event {event_id} sent");
    Ok(())
}
