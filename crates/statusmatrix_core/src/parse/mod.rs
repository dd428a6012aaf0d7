//! Text parsing primitives for status reports and reference lists.
//!
//! # Responsibility
//! - Decide which lines reference a CR and extract the raw token.
//!
//! # Invariants
//! - Parsing is line-anchored; no free-text search for identifiers.

pub mod line;
