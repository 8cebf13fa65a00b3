// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    shorter       = { "abc",     5, "abc" },
    exact         = { "abcde",   5, "abcde" },
    longer        = { "abcdefg", 5, "abcd…" },
    zero          = { "abc",     0, "" },
    one           = { "abc",     1, "…" },
    multibyte     = { "héllo wörld", 4, "hél…" },
)]
fn truncate_cases(input: &str, max_len: usize, expected: &str) {
    assert_eq!(truncate(input, max_len), expected);
}

#[test]
fn truncate_never_exceeds_limit() {
    for len in 0..20 {
        let out = truncate("the quick brown fox jumps", len);
        assert!(out.chars().count() <= len, "len {len} produced {out:?}");
    }
}
