//! Header normalization and column lookup shared by the CSV readers.
//!
//! Input files come from different planning sheets, so each field is looked up
//! through a list of candidate header names. Lookups happen once, when the
//! header row is read; rows are then mapped into fixed record shapes.

use crate::error::{Result, SurgeError};
use csv::StringRecord;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashMap;
use std::str::FromStr;

/// Trims, uppercases, treats `_` as a space and collapses inner whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Normalized header name to column position.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(headers: &StringRecord) -> Self {
        let mut columns = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            columns.entry(normalize_header(header)).or_insert(i);
        }
        Self { columns }
    }

    /// Position of the first candidate present in the header row.
    pub fn find(&self, candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|c| self.columns.get(&normalize_header(c)).copied())
    }

    pub fn require(&self, field: &str, candidates: &[&str]) -> Result<usize> {
        self.find(candidates).ok_or_else(|| {
            SurgeError::MissingColumn(format!("{field} (tried {})", candidates.join(", ")))
        })
    }
}

/// Trimmed cell text, `None` when the column is absent or the cell is blank.
pub fn cell(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses a non-negative whole number. Integral decimals such as `5.0` are
/// accepted since spreadsheets often export counts that way.
pub fn parse_count(field: &str, value: Option<&str>, row: u64) -> Result<u32> {
    let malformed = |reason: String| SurgeError::MalformedRecord { row, reason };
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| malformed(format!("{field} is empty")))?;

    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }
    let number = Decimal::from_str(value)
        .map_err(|_| malformed(format!("{field} '{value}' is not a number")))?;
    if number.is_sign_negative() && !number.is_zero() {
        return Err(malformed(format!("{field} '{value}' is negative")));
    }
    if !number.fract().is_zero() {
        return Err(malformed(format!("{field} '{value}' is not a whole number")));
    }
    number
        .to_u32()
        .ok_or_else(|| malformed(format!("{field} '{value}' is out of range")))
}

/// Parses a decimal cell; blank cells yield `None`.
pub fn parse_decimal(field: &str, value: Option<&str>, row: u64) -> Result<Option<Decimal>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Decimal::from_str(v.trim_end_matches('%').trim())
            .map(Some)
            .map_err(|_| SurgeError::MalformedRecord {
                row,
                reason: format!("{field} '{v}' is not a number"),
            }),
    }
}
