//! Properties-style source parsing into candidate records.
//!
//! Each entry has the form
//! `mascota.<key> = <id>,<nickname>,<classification>,<family>,<genus>,<species>,<diet>,<age>,<weight>,<notes>`.
//! Values are split positionally; missing or malformed fields are left unset
//! rather than rejecting the entry.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    record::Record,
    types::{Classification, DietType},
};

/// Key prefix that marks an entry as an animal record.
pub const DEFAULT_KEY_PREFIX: &str = "mascota.";

/// Number of positional fields in a full entry.
pub const FIELD_COUNT: usize = 10;

/// One parsed source entry and its position in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    /// 1-based source line.
    pub line: usize,
    /// Entry key, prefix included.
    pub key: String,
    /// Candidate record, complete or partial.
    pub record: Record,
}

/// Why a line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `=` or `:` between key and value.
    MissingSeparator,
    /// The value holds no non-empty token.
    EmptyValue,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => f.write_str("missing key/value separator"),
            Self::EmptyValue => f.write_str("empty value"),
        }
    }
}

/// Result of parsing one non-blank, non-comment line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A candidate record was built.
    Entry(SourceEntry),
    /// The key does not carry the expected prefix.
    Ignored {
        /// 1-based source line.
        line: usize,
        /// Foreign key.
        key: String,
    },
    /// The line could not be turned into a record.
    Skipped {
        /// 1-based source line.
        line: usize,
        /// Skip cause.
        reason: SkipReason,
    },
}

impl LineOutcome {
    /// Source line this outcome belongs to.
    pub fn line(&self) -> usize {
        match self {
            Self::Entry(entry) => entry.line,
            Self::Ignored { line, .. } | Self::Skipped { line, .. } => *line,
        }
    }
}

/// Turns source text into candidate records.
#[derive(Debug, Clone)]
pub struct RecordParser {
    key_prefix: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

impl RecordParser {
    /// Parser accepting keys that start with `key_prefix`.
    pub fn new(key_prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: key_prefix.into(),
        }
    }

    /// Expected key prefix.
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Parses every line of `text`, in source order. Blank and comment lines
    /// produce no outcome.
    pub fn parse_source(&self, text: &str) -> Vec<LineOutcome> {
        text.lines()
            .enumerate()
            .filter_map(|(idx, raw)| self.parse_line(idx + 1, raw))
            .collect()
    }

    /// Parses a single line. Returns `None` for blank lines and for comments
    /// starting with `#` or `!`.
    pub fn parse_line(&self, line: usize, raw: &str) -> Option<LineOutcome> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            return None;
        }

        let Some(split_at) = trimmed.find(['=', ':']) else {
            warn!(line, reason = %SkipReason::MissingSeparator, "skipping source line");
            return Some(LineOutcome::Skipped {
                line,
                reason: SkipReason::MissingSeparator,
            });
        };
        let key = trimmed[..split_at].trim();
        let value = trimmed[split_at + 1..].trim();

        if !key.starts_with(&self.key_prefix) {
            debug!(line, key, "ignoring foreign key");
            return Some(LineOutcome::Ignored {
                line,
                key: key.to_string(),
            });
        }

        let Some(record) = parse_value(value) else {
            warn!(line, key, reason = %SkipReason::EmptyValue, "skipping source line");
            return Some(LineOutcome::Skipped {
                line,
                reason: SkipReason::EmptyValue,
            });
        };

        Some(LineOutcome::Entry(SourceEntry {
            line,
            key: key.to_string(),
            record,
        }))
    }
}

/// Builds a record from a comma-separated value by positional mapping.
///
/// Returns `None` only when no token is non-empty. The last field (`notes`)
/// keeps any further commas, and stays `None` when the value has fewer than
/// ten tokens.
pub fn parse_value(value: &str) -> Option<Record> {
    let tokens: Vec<&str> = value.splitn(FIELD_COUNT, ',').map(str::trim).collect();
    if tokens.iter().all(|t| t.is_empty()) {
        return None;
    }

    let token = |idx: usize| tokens.get(idx).copied().unwrap_or("");

    Some(Record {
        id: token(0).to_string(),
        nickname: token(1).to_string(),
        classification: Classification::from_token(token(2)),
        family: token(3).to_string(),
        genus: token(4).to_string(),
        species: token(5).to_string(),
        diet_type: DietType::from_token(token(6)),
        age: parse_age(token(7)),
        weight: parse_weight(token(8)),
        notes: tokens.get(9).map(|t| t.to_string()),
    })
}

/// Non-negative integer, or zero for empty, malformed, or negative tokens.
fn parse_age(token: &str) -> i32 {
    if token.is_empty() {
        return 0;
    }
    match token.parse::<i32>() {
        Ok(v) if v >= 0 => v,
        _ => 0,
    }
}

/// Finite non-negative float, or zero otherwise.
fn parse_weight(token: &str) -> f64 {
    if token.is_empty() {
        return 0.0;
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}
