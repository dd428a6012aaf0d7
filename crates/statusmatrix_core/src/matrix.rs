//! Person × CR assignment matrix.
//!
//! # Responsibility
//! - Build the presence grid from roster, universe and per-person sets.
//!
//! # Invariants
//! - Rows follow roster order; duplicate names are independent rows.
//! - Columns follow universe order; every row has one cell per column.
//! - Roster members without a scanned report get an all-blank row.

use crate::model::cr_id::CrId;
use std::collections::{BTreeSet, HashMap};

/// Cell text for a reported assignment.
pub const MARK_PRESENT: &str = "X";
/// Cell text for no assignment. A space keeps the cell non-empty.
pub const MARK_ABSENT: &str = " ";

/// One roster member's row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub name: String,
    pub cells: Vec<bool>,
}

impl MatrixRow {
    /// Renders cells as `X` / single-space marks.
    pub fn marks(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells
            .iter()
            .map(|present| if *present { MARK_PRESENT } else { MARK_ABSENT })
    }
}

/// Presence grid over a fixed universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMatrix {
    universe: Vec<CrId>,
    rows: Vec<MatrixRow>,
}

impl AssignmentMatrix {
    /// Builds the grid.
    ///
    /// `universe` is expected sorted and duplicate-free; it is used verbatim as
    /// the column order.
    pub fn build(
        team: &[String],
        universe: &[CrId],
        per_person: &HashMap<String, BTreeSet<CrId>>,
    ) -> Self {
        let rows = team
            .iter()
            .map(|name| {
                let cells = match per_person.get(name) {
                    Some(ids) => universe.iter().map(|id| ids.contains(id)).collect(),
                    None => vec![false; universe.len()],
                };
                MatrixRow {
                    name: name.clone(),
                    cells,
                }
            })
            .collect();

        Self {
            universe: universe.to_vec(),
            rows,
        }
    }

    pub fn universe(&self) -> &[CrId] {
        &self.universe
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    /// Identifiers marked for one row, in column order.
    pub fn assigned(&self, row: usize) -> Vec<&CrId> {
        let Some(row) = self.rows.get(row) else {
            return Vec::new();
        };
        self.universe
            .iter()
            .zip(&row.cells)
            .filter_map(|(id, present)| present.then_some(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AssignmentMatrix, MARK_ABSENT, MARK_PRESENT};
    use crate::model::cr_id::CrId;
    use std::collections::{BTreeSet, HashMap};

    fn ids(raw: &[&str]) -> Vec<CrId> {
        raw.iter()
            .map(|r| CrId::normalize(r).expect("fixture id should normalize"))
            .collect()
    }

    #[test]
    fn grid_is_complete_and_follows_roster_order() {
        let team = vec!["Zed".to_string(), "Amy".to_string(), "Zed".to_string()];
        let universe = ids(&["1", "2", "3"]);
        let mut per_person: HashMap<String, BTreeSet<CrId>> = HashMap::new();
        per_person.insert("Zed".to_string(), ids(&["2"]).into_iter().collect());

        let matrix = AssignmentMatrix::build(&team, &universe, &per_person);
        let names: Vec<&str> = matrix.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Zed"]);

        for row in matrix.rows() {
            assert_eq!(row.cells.len(), universe.len());
        }
        assert_eq!(matrix.rows()[0].cells, vec![false, true, false]);
        assert_eq!(matrix.rows()[1].cells, vec![false, false, false]);
        assert_eq!(matrix.rows()[2], matrix.rows()[0]);
    }

    #[test]
    fn marks_render_x_or_single_space() {
        let team = vec!["Bob".to_string()];
        let universe = ids(&["1", "2"]);
        let per_person: HashMap<String, BTreeSet<CrId>> =
            HashMap::from([("Bob".to_string(), ids(&["1"]).into_iter().collect())]);

        let matrix = AssignmentMatrix::build(&team, &universe, &per_person);
        let row = &matrix.rows()[0];
        let record: Vec<&str> = std::iter::once(row.name.as_str())
            .chain(row.marks())
            .collect();
        assert_eq!(record, vec!["Bob", MARK_PRESENT, MARK_ABSENT]);
    }

    #[test]
    fn assigned_follows_columns() {
        let team = vec!["Hunter".to_string()];
        let universe = ids(&["83875", "84492", "87893"]);
        let per_person: HashMap<String, BTreeSet<CrId>> =
            HashMap::from([("Hunter".to_string(), ids(&["87893", "83875"]).into_iter().collect())]);

        let matrix = AssignmentMatrix::build(&team, &universe, &per_person);
        assert_eq!(matrix.rows()[0].cells, vec![true, false, true]);
        assert!(matrix.assigned(1).is_empty());
        let assigned: Vec<&str> = matrix.assigned(0).iter().map(|id| id.as_str()).collect();
        assert_eq!(assigned, vec!["83875", "87893"]);
    }
}
