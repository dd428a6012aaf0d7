//! Identifier set extraction from one status report.

use crate::model::cr_id::CrId;
use crate::parse::line::classify_status_line;
use std::collections::BTreeSet;

/// Returns every accepted identifier referenced by `report_text`.
///
/// Repeated mentions collapse to one entry; presence is tracked, not
/// frequency.
pub fn scan(report_text: &str) -> BTreeSet<CrId> {
    report_text
        .lines()
        .filter_map(classify_status_line)
        .map(|mention| mention.id)
        .collect()
}
