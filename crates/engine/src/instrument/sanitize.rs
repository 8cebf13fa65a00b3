// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scrubbing of recorded URLs and query text.

/// Strip userinfo, query string and fragment from a URL.
///
/// `https://user:pw@api.example.com/v1/users?token=x#top` becomes
/// `https://api.example.com/v1/users`. Input without a scheme only loses
/// its query and fragment.
pub fn url(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let trimmed = &raw[..end];

    let Some(scheme_end) = trimmed.find("://").map(|i| i + 3) else {
        return trimmed.to_string();
    };
    let (scheme, rest) = trimmed.split_at(scheme_end);
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let (authority, path) = rest.split_at(authority_end);
    let host = authority.rsplit_once('@').map(|(_, host)| host).unwrap_or(authority);
    format!("{scheme}{host}{path}")
}

/// Collapse whitespace runs to one space and replace single-quoted string
/// literals with `?`.
///
/// Doubled quotes (`'it''s'`) stay inside the literal. An unterminated
/// literal is replaced through the end of the text.
pub fn query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if c != '\'' {
            out.push(c);
            continue;
        }
        out.push('?');
        while let Some(inner) = chars.next() {
            if inner == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                } else {
                    break;
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
