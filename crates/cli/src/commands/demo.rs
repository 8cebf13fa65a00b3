// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `falcon demo`

use anyhow::Result;
use clap::Args;
use falcon_engine::{Client, ClientOptions};

use super::{OptionsSource, FLUSH_TIMEOUT};
use crate::checkout;
use crate::exit_error::ExitError;
use crate::output::{render, OutputFormat};
use crate::recorder::RecordingTransport;

/// API key used when `--dry-run` runs without configuration.
const DRY_RUN_KEY: &str = "sk_dry_run";

#[derive(Args)]
pub struct DemoArgs {
    /// Print the payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub async fn handle(args: DemoArgs, source: &OptionsSource) -> Result<()> {
    if args.dry_run {
        let printed = dry_run(source.load()?, args.output).await?;
        println!("{printed}");
        return Ok(());
    }

    let client = Client::with_http(source.load_validated()?)?;
    let event_id = checkout::run(&client).await;
    if !client.shutdown(FLUSH_TIMEOUT) {
        return Err(ExitError::delivery("demo event still queued after timeout").into());
    }
    match event_id {
        Some(id) => println!("demo event {id} sent"),
        None => println!("demo checkout succeeded, nothing captured"),
    }
    Ok(())
}

/// Run the scenario against an in-memory transport and render what would
/// have been sent.
pub async fn dry_run(mut options: ClientOptions, format: OutputFormat) -> Result<String> {
    if options.api_key.trim().is_empty() {
        options.api_key = DRY_RUN_KEY.to_string();
    }
    if options.app_name.is_empty() {
        options.app_name = "falcon-demo".to_string();
    }
    let transport = RecordingTransport::new();
    let client = Client::new(options, transport.clone())?;

    checkout::run(&client).await;
    client.shutdown(FLUSH_TIMEOUT);
    render(&transport.take(), format)
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
