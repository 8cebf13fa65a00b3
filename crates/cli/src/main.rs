// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `falcon`: send heartbeats and test events, or replay the checkout demo.

mod checkout;
mod color;
mod commands;
mod exit_error;
mod logging;
mod output;
mod recorder;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{capture, demo, heartbeat};
use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(
    name = "falcon",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FALCON_BUILD_HASH"), ")"),
    about = "Falcon capture engine: heartbeats, test events and the breadcrumb demo",
    styles = color::styles()
)]
struct Cli {
    /// Read client options from a TOML file (environment still overrides)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging and warn-level delivery failures
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send a cron heartbeat
    Heartbeat(heartbeat::HeartbeatArgs),
    /// Send a test event
    Capture(capture::CaptureArgs),
    /// Run the checkout demo scenario
    Demo(demo::DemoArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<ExitError>().map_or(1, |e| e.code);
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let source = commands::OptionsSource { config: cli.config, debug: cli.debug };
    match cli.command {
        Command::Heartbeat(args) => heartbeat::handle(args, &source).await,
        Command::Capture(args) => capture::handle(args, &source),
        Command::Demo(args) => demo::handle(args, &source).await,
    }
}
