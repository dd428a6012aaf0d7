//! Status report scanning.
//!
//! # Responsibility
//! - Turn one person's report text into referenced identifiers.
//! - Extract per-CR work descriptions for the consolidated report.
//!
//! # Invariants
//! - Scanning is pure: no registry or matrix state is touched here.

pub mod report;
pub mod work;
