// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String helpers that bound the memory held by recorded data.

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Truncate `s` to at most `max_len` characters, marking the cut with
/// [`ELLIPSIS`] (which counts toward the limit).
pub fn truncate(s: &str, max_len: usize) -> String {
    let mut owned = s.to_string();
    truncate_in_place(&mut owned, max_len);
    owned
}

/// In-place variant of [`truncate`].
pub fn truncate_in_place(s: &mut String, max_len: usize) {
    let Some((cut, _)) = s.char_indices().nth(max_len) else {
        return;
    };
    if max_len == 0 {
        s.clear();
        return;
    }
    // Leave room for the marker inside the limit.
    let keep = s.char_indices().nth(max_len - 1).map(|(idx, _)| idx).unwrap_or(cut);
    s.truncate(keep);
    s.push(ELLIPSIS);
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
