// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for rendered payloads and `--help`.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

/// ANSI 256-color codes by what they highlight.
pub mod codes {
    pub const ERROR_TYPE: u8 = 74;
    pub const FLAG: u8 = 250;
    pub const TIMESTAMP: u8 = 245;
    /// Event ids and breadcrumb categories.
    pub const DIM: u8 = 240;
}

const RESET: &str = "\x1b[0m";

/// `NO_COLOR=1` wins over `COLOR=1`; otherwise color only on a terminal.
pub fn should_colorize() -> bool {
    let flag = |name: &str| std::env::var(name).is_ok_and(|v| v == "1");
    if flag("NO_COLOR") {
        false
    } else {
        flag("COLOR") || std::io::stdout().is_terminal()
    }
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::ERROR_TYPE))
        .literal(fg(codes::FLAG))
        .placeholder(fg(codes::TIMESTAMP))
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn error_type(text: &str) -> String {
    paint(codes::ERROR_TYPE, text)
}

pub fn timestamp(text: &str) -> String {
    paint(codes::TIMESTAMP, text)
}

pub fn dim(text: &str) -> String {
    paint(codes::DIM, text)
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
