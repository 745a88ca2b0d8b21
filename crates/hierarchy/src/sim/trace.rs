//! Access trace parsing.
//!
//! One access per line: `<op> <address>`, where `op` is `R`, `W`, or `B`
//! (case-insensitive) and the address is decimal or `0x`-prefixed hex.
//! Blank lines and lines starting with `#` are skipped. This is the only
//! place untyped operation codes enter the system, so it is where an
//! invalid operation is reported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::data::Operation;
use crate::common::error::TraceError;

/// One access parsed from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Access kind.
    pub operation: Operation,
    /// Accessed byte address.
    pub address: u64,
}

/// Parses a full trace from a reader.
///
/// # Errors
///
/// The first malformed line wins: an unknown operation code, an address
/// that parses as neither decimal nor hex, a line that does not split into
/// two fields, or an I/O failure.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<TraceEntry>, TraceError> {
    let mut entries = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        entries.push(parse_line(line, number + 1)?);
    }
    Ok(entries)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// I/O failures and any error from [`parse`].
pub fn load(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

fn parse_line(line: &str, number: usize) -> Result<TraceEntry, TraceError> {
    let mut fields = line.split_whitespace();
    let (Some(op), Some(addr)) = (fields.next(), fields.next()) else {
        return Err(TraceError::Malformed { line: number });
    };
    if fields.next().is_some() {
        return Err(TraceError::Malformed { line: number });
    }

    let mut chars = op.chars();
    let operation = match (chars.next(), chars.next()) {
        (Some(code), None) => Operation::from_code(code),
        _ => None,
    }
    .ok_or_else(|| TraceError::InvalidOperation {
        line: number,
        code: op.to_string(),
    })?;

    let address = parse_address(addr).ok_or_else(|| TraceError::InvalidAddress {
        line: number,
        address: addr.to_string(),
    })?;

    Ok(TraceEntry { operation, address })
}

fn parse_address(field: &str) -> Option<u64> {
    field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .map_or_else(|| field.parse().ok(), |hex| u64::from_str_radix(hex, 16).ok())
}
