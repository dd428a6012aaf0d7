//! Line classification for CR references.
//!
//! # Responsibility
//! - Recognize lines that assert a CR reference and split out the token.
//! - Provide two acceptance policies over one shared primitive:
//!   registry lines (curated, lenient) and status lines (filtered).
//!
//! # Invariants
//! - Only lines that start with `CR` + whitespace (after trimming) qualify.
//!   Mid-sentence mentions such as `completed after CR83875` never match.
//! - A token is a maximal run of `[A-Za-z0-9_]`.
//! - Status lines accept a token only when it has a decimal digit or its
//!   canonical form is in [`NON_NUMERIC_ALLOW_LIST`].

use crate::model::cr_id::CrId;
use once_cell::sync::Lazy;
use regex::Regex;

static CR_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^CR\s+([A-Za-z0-9_]+)\s*(.*)$").expect("valid cr line regex")
});

/// Non-numeric codes accepted on status lines.
pub const NON_NUMERIC_ALLOW_LIST: &[&str] = &["FOD01", "FOD02", "A_III", "A__II"];

/// Raw split of an anchored CR line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrLine<'a> {
    /// Token immediately following `CR` + whitespace, as written.
    pub raw_id: &'a str,
    /// Rest of the line after the token, trimmed. May be empty.
    pub remainder: &'a str,
}

/// Classified line with its canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrMention<'a> {
    pub id: CrId,
    pub raw_id: &'a str,
    pub remainder: &'a str,
}

/// Splits an anchored `CR <token> <remainder>` line.
///
/// Returns `None` when the trimmed line does not start with `CR` followed by
/// whitespace and a token.
pub fn split_cr_line(line: &str) -> Option<CrLine<'_>> {
    let captures = CR_LINE_RE.captures(line.trim())?;
    let raw_id = captures.get(1)?.as_str();
    let remainder = captures.get(2).map_or("", |m| m.as_str().trim_end());
    Some(CrLine { raw_id, remainder })
}

/// Classifies a reference-list or metadata line. Any token is accepted.
pub fn classify_registry_line(line: &str) -> Option<CrMention<'_>> {
    let split = split_cr_line(line)?;
    let id = CrId::normalize(split.raw_id)?;
    Some(CrMention {
        id,
        raw_id: split.raw_id,
        remainder: split.remainder,
    })
}

/// Classifies a status report line, applying the acceptance filter.
pub fn classify_status_line(line: &str) -> Option<CrMention<'_>> {
    let split = split_cr_line(line)?;
    let id = CrId::normalize(split.raw_id)?;
    if !is_accepted_status_token(split.raw_id, &id) {
        return None;
    }
    Some(CrMention {
        id,
        raw_id: split.raw_id,
        remainder: split.remainder,
    })
}

/// Returns whether a status token looks like a real CR reference.
pub fn is_accepted_status_token(raw_id: &str, id: &CrId) -> bool {
    raw_id.bytes().any(|b| b.is_ascii_digit()) || NON_NUMERIC_ALLOW_LIST.contains(&id.as_str())
}
