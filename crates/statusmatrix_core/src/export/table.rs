//! Two-header CSV table export.
//!
//! Layout:
//! - row 1: `TITLE`, then one title (or placeholder) per identifier;
//! - row 2: `NAME`, then `CR <id>` per identifier;
//! - rows 3+: member name, then `X` or a single space per identifier.

use super::ExportResult;
use crate::matrix::AssignmentMatrix;
use crate::model::cr_id::CrId;
use crate::registry::Registry;
use std::io::Write;
use std::path::Path;

pub const TITLE_ROW_LABEL: &str = "TITLE";
pub const ID_ROW_LABEL: &str = "NAME";

/// Writes the matrix as CSV into `out`.
pub fn write_table<W: Write>(
    out: W,
    registry: &Registry,
    matrix: &AssignmentMatrix,
) -> ExportResult<()> {
    let mut writer = csv::Writer::from_writer(out);

    let title_row = std::iter::once(TITLE_ROW_LABEL).chain(
        matrix
            .universe()
            .iter()
            .map(|id| registry.title_for(id)),
    );
    writer.write_record(title_row)?;

    let mut id_row = Vec::with_capacity(matrix.universe().len() + 1);
    id_row.push(ID_ROW_LABEL.to_string());
    id_row.extend(matrix.universe().iter().map(CrId::label));
    writer.write_record(&id_row)?;

    for row in matrix.rows() {
        writer.write_record(std::iter::once(row.name.as_str()).chain(row.marks()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the matrix as CSV to `path`, replacing any previous file.
pub fn export_table(
    path: &Path,
    registry: &Registry,
    matrix: &AssignmentMatrix,
) -> ExportResult<()> {
    let file = std::fs::File::create(path)?;
    write_table(std::io::BufWriter::new(file), registry, matrix)
}

#[cfg(test)]
mod tests {
    use super::write_table;
    use crate::matrix::AssignmentMatrix;
    use crate::model::cr_id::CrId;
    use crate::registry::{Registry, TITLE_PLACEHOLDER};
    use std::collections::{BTreeSet, HashMap};

    fn id(raw: &str) -> CrId {
        CrId::normalize(raw).expect("fixture id should normalize")
    }

    fn read_records(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(|record| {
                record
                    .expect("record should parse")
                    .iter()
                    .map(str::to_string)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn writes_title_row_id_row_and_member_rows() {
        let universe = vec![id("1"), id("2")];
        let team = vec!["Bob".to_string(), "Ann".to_string()];
        let per_person: HashMap<String, BTreeSet<CrId>> =
            HashMap::from([("Bob".to_string(), BTreeSet::from([id("2")]))]);
        let matrix = AssignmentMatrix::build(&team, &universe, &per_person);
        let registry = Registry::from_lines(
            ["CR 1 Design", "CR 2 Test"],
            Some(["CR 1 Design, phase 2"]),
        );

        let mut out = Vec::new();
        write_table(&mut out, &registry, &matrix).expect("table should render");

        let records = read_records(&out);
        assert_eq!(
            records,
            vec![
                vec!["TITLE", "Design, phase 2", TITLE_PLACEHOLDER],
                vec!["NAME", "CR 1", "CR 2"],
                vec!["Bob", " ", "X"],
                vec!["Ann", " ", " "],
            ]
        );
    }

    #[test]
    fn empty_universe_still_writes_headers() {
        let team = vec!["Solo".to_string()];
        let matrix = AssignmentMatrix::build(&team, &[], &HashMap::new());

        let mut out = Vec::new();
        write_table(&mut out, &Registry::default(), &matrix).expect("table should render");

        let records = read_records(&out);
        assert_eq!(records, vec![vec!["TITLE"], vec!["NAME"], vec!["Solo"]]);
    }
}
