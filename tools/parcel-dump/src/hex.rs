// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Hex text input and short hex previews.

use std::fmt::Write;

/// Bytes shown by [`preview`] before eliding.
const PREVIEW_LEN: usize = 16;

/// Parse hex digits, ignoring whitespace, commas, `0x` prefixes and
/// `#` comments up to end of line.
pub fn parse(text: &str) -> anyhow::Result<Vec<u8>> {
    let mut digits = Vec::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or("");
        for token in line.split(|c: char| c.is_whitespace() || c == ',') {
            let token = token.strip_prefix("0x").unwrap_or(token);
            if let Some(bad) = token.chars().find(|c| !c.is_ascii_hexdigit()) {
                anyhow::bail!("bad hex digit {:?} in {:?}", bad, token);
            }
            digits.extend_from_slice(token.as_bytes());
        }
    }
    if digits.len() % 2 != 0 {
        anyhow::bail!("odd number of hex digits ({})", digits.len());
    }
    Ok(digits
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

/// Value of an ASCII hex digit already checked by [`parse`].
fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// `de ad be ef ...` for at most [`PREVIEW_LEN`] bytes.
pub fn preview(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, b) in bytes.iter().take(PREVIEW_LEN).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:02x}");
    }
    if bytes.len() > PREVIEW_LEN {
        out.push_str(" ..");
    }
    out
}
