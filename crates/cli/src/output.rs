// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write as _;

use clap::ValueEnum;
use falcon_core::{format_elapsed_ms, format_utc, CapturedEvent, CronHeartbeat, Envelope};

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render payloads in the requested format. JSON output is the exact body
/// the ingest API would receive, one array for the whole batch.
pub fn render(envelopes: &[Envelope], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(envelopes)?),
        OutputFormat::Text => Ok(envelopes.iter().map(render_text).collect::<Vec<_>>().join("\n")),
    }
}

pub fn render_text(envelope: &Envelope) -> String {
    match envelope {
        Envelope::Event(event) => render_event(event),
        Envelope::Heartbeat(hb) => render_heartbeat(hb),
    }
}

fn render_event(event: &CapturedEvent) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "event {} {}: {}",
        color::dim(&event.event_id().short(8)),
        color::error_type(event.error_type()),
        event.error_message()
    );

    if !event.breadcrumbs().is_empty() {
        let _ = writeln!(out, "breadcrumbs:");
        for crumb in event.breadcrumbs() {
            let _ = writeln!(
                out,
                "  {} {:<10} {} {}",
                color::timestamp(&format_utc(&crumb.timestamp)),
                crumb.kind.to_string(),
                crumb.message,
                color::dim(&format!("[{}]", crumb.category))
            );
        }
    }

    if !event.scopes().is_empty() {
        let _ = writeln!(out, "scopes:");
        for scope in event.scopes() {
            let _ = writeln!(out, "  {} {}", scope.name, color::dim(&format!("({})", scope.category)));
        }
    }

    if !event.tags().is_empty() {
        let tags: Vec<String> = event.tags().iter().map(|(k, v)| format!("{k}={v}")).collect();
        let _ = writeln!(out, "tags: {}", tags.join(" "));
    }
    out
}

fn render_heartbeat(hb: &CronHeartbeat) -> String {
    let duration = hb.duration_ms.map(format_elapsed_ms).unwrap_or_else(|| "-".to_string());
    format!("heartbeat {} {} {}\n", hb.job_slug, hb.status, duration)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
