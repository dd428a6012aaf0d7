//! Run summary returned to callers.

use crate::matrix::AssignmentMatrix;
use crate::model::cr_id::CrId;
use serde::Serialize;
use std::path::PathBuf;

/// Identifiers marked for one roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberAssignments {
    pub name: String,
    pub crs: Vec<CrId>,
}

/// Per-report scan outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub person: String,
    pub file: PathBuf,
    /// `None` when the report could not be read.
    pub encoding: Option<&'static str>,
    pub crs: Vec<CrId>,
}

/// Machine-readable result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub team: Vec<String>,
    pub reports: Vec<ReportOutcome>,
    pub known_before: usize,
    pub new_crs: Vec<CrId>,
    pub universe: Vec<CrId>,
    pub registry_persisted: bool,
    pub registry_error: Option<String>,
    pub metadata_loaded: bool,
    pub assignments: Vec<MemberAssignments>,
    pub table_path: PathBuf,
    pub consolidated_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn reports_skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.encoding.is_none()).count()
    }

    /// Assignment summary lines, one per roster member.
    pub fn assignment_lines(&self) -> Vec<String> {
        self.assignments
            .iter()
            .map(|member| {
                if member.crs.is_empty() {
                    format!("{}: No assignments found", member.name)
                } else {
                    let labels: Vec<String> = member.crs.iter().map(CrId::label).collect();
                    format!("{}: {}", member.name, labels.join(", "))
                }
            })
            .collect()
    }
}

pub(crate) fn member_assignments(matrix: &AssignmentMatrix) -> Vec<MemberAssignments> {
    matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| MemberAssignments {
            name: row.name.clone(),
            crs: matrix.assigned(index).into_iter().cloned().collect(),
        })
        .collect()
}
