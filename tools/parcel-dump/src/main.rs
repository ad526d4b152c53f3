// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod hex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use safeparcel::codec::{Walk, WireEntry};
use safeparcel::config::{CodecConfig, HEADER_SIZE, LENGTH_PREFIX_SIZE};
use safeparcel::wire::WireType;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "parcel-dump")]
#[command(about = "Schema-less inspector for captured SafeParcel payloads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entry of the top-level record
    Dump {
        /// Captured payload
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Descend into length-prefixed payloads that parse as records
        #[arg(short, long)]
        recurse: bool,
    },

    /// Validate envelope and entry framing only
    Check {
        /// Captured payload
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = CodecConfig::from_env();
    log::debug!("limits: {:?}", config);

    match cli.command {
        Commands::Dump {
            input,
            hex,
            recurse,
        } => {
            let bytes = load(&input, hex)?;
            dump(&mut std::io::stdout().lock(), &bytes, recurse, &config)?;
        }
        Commands::Check { input, hex } => {
            let bytes = load(&input, hex)?;
            let count = check(&bytes, &config).with_context(|| input.display().to_string())?;
            println!("[OK] {}: {} entries, framing valid", input.display(), count);
        }
    }

    Ok(())
}

fn load(input: &Path, hex: bool) -> anyhow::Result<Vec<u8>> {
    if hex {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?;
        hex::parse(&text).with_context(|| format!("parsing hex in {}", input.display()))
    } else {
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))
    }
}

/// Declared envelope length; `walk` has already validated the prefix.
fn envelope_len(bytes: &[u8]) -> usize {
    bytes
        .get(..LENGTH_PREFIX_SIZE)
        .and_then(|prefix| <[u8; 4]>::try_from(prefix).ok())
        .map_or(0, |prefix| i32::from_le_bytes(prefix).max(0) as usize)
}

fn dump(out: &mut impl Write, bytes: &[u8], recurse: bool, config: &CodecConfig) -> anyhow::Result<()> {
    let entries = safeparcel::walk_with(bytes, config).context("invalid record envelope")?;
    let len = envelope_len(bytes);
    writeln!(out, "record: {} bytes ({} total)", len, bytes.len())?;

    print_entries(out, entries, 1, LENGTH_PREFIX_SIZE, recurse, config)?;

    let trailing = bytes.len() - LENGTH_PREFIX_SIZE - len;
    if trailing > 0 {
        writeln!(out, "[WARN] {} trailing bytes after record", trailing)?;
    }
    Ok(())
}

fn print_entries(
    out: &mut impl Write,
    entries: Walk<'_>,
    depth: usize,
    base: usize,
    recurse: bool,
    config: &CodecConfig,
) -> anyhow::Result<()> {
    let indent = "  ".repeat(depth);
    for entry in entries {
        let entry = entry.context("invalid entry")?;
        writeln!(
            out,
            "{}@{:<6} tag {:<6} {:<15} {}",
            indent,
            base + entry.offset,
            entry.header.tag,
            entry.header.wire_type,
            summarize(&entry)
        )?;

        if !recurse
            || entry.header.wire_type != WireType::LengthPrefixed
            || !looks_like_record(entry.payload, config)
        {
            continue;
        }
        if depth >= config.max_depth {
            writeln!(out, "{}  [WARN] nesting deeper than {} not expanded", indent, config.max_depth)?;
            continue;
        }
        let nested_base = base + entry.offset + HEADER_SIZE + LENGTH_PREFIX_SIZE;
        let nested = Walk::body_with(entry.payload, config);
        print_entries(out, nested, depth + 1, nested_base, recurse, config)?;
    }
    Ok(())
}

fn summarize(entry: &WireEntry<'_>) -> String {
    let payload = entry.payload;
    match entry.header.wire_type {
        WireType::Fixed32 => match <[u8; 4]>::try_from(payload) {
            Ok(raw) => format!("i32={} f32={}", i32::from_le_bytes(raw), f32::from_le_bytes(raw)),
            Err(_) => hex::preview(payload),
        },
        WireType::Fixed64 => match <[u8; 8]>::try_from(payload) {
            Ok(raw) => format!("i64={} f64={}", i64::from_le_bytes(raw), f64::from_le_bytes(raw)),
            Err(_) => hex::preview(payload),
        },
        WireType::LengthPrefixed => match std::str::from_utf8(payload) {
            Ok(text) if !text.is_empty() && !text.chars().any(char::is_control) => {
                format!("len={} {:?}", payload.len(), text)
            }
            _ => format!("len={} {}", payload.len(), hex::preview(payload)),
        },
    }
}

/// Whether `payload` is a well-formed, non-empty sequence of entries.
fn looks_like_record(payload: &[u8], config: &CodecConfig) -> bool {
    !payload.is_empty()
        && payload.len() % 4 == 0
        && Walk::body_with(payload, config).all(|entry| entry.is_ok())
}

/// Validate framing under `config`; returns the top-level entry count.
fn check(bytes: &[u8], config: &CodecConfig) -> anyhow::Result<usize> {
    let entries = safeparcel::walk_with(bytes, config).context("invalid record envelope")?;
    let mut count = 0usize;
    for entry in entries {
        if let Err(err) = entry {
            anyhow::bail!("entry {} is invalid: {}", count, err);
        }
        count += 1;
    }

    let trailing = bytes.len() - LENGTH_PREFIX_SIZE - envelope_len(bytes);
    if trailing > 0 {
        if config.reject_trailing_bytes {
            anyhow::bail!("{} trailing bytes after record", trailing);
        }
        log::warn!("ignoring {} trailing bytes after record", trailing);
    }
    log::debug!("checked {} bytes", bytes.len());
    Ok(count)
}
