//! Consolidated per-CR status report.
//!
//! # Responsibility
//! - Group each person's work descriptions under the CR they belong to.
//! - Render the grouped view as an indented plain-text report.
//!
//! # Invariants
//! - Non-numeric CRs come first (lexicographic), then numeric CRs in
//!   ascending numeric order.
//! - Contributors within a CR keep the order they were grouped in.

use super::ExportResult;
use crate::model::cr_id::CrId;
use crate::registry::Registry;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

const BANNER_WIDTH: usize = 65;
const SECTION_WIDTH: usize = 53;
const INDENT: &str = "    ";

/// One person's description for one CR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub person: String,
    pub description: String,
}

/// CR -> contributions, ready for rendering.
pub type WorkByCr = BTreeMap<CrId, Vec<Contribution>>;

/// Banner values for the consolidated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub team_label: String,
    pub generated_at: String,
    pub team_size: usize,
}

/// Regroups per-person details into per-CR contributions.
///
/// `per_person` is consumed in the given order, so callers decide contributor
/// order (roster order first in the pipeline).
pub fn group_by_cr<'a, I>(per_person: I) -> WorkByCr
where
    I: IntoIterator<Item = (&'a str, &'a BTreeMap<CrId, String>)>,
{
    let mut grouped = WorkByCr::new();
    for (person, details) in per_person {
        for (id, description) in details {
            grouped.entry(id.clone()).or_default().push(Contribution {
                person: person.to_string(),
                description: description.clone(),
            });
        }
    }
    grouped
}

/// Report ordering: non-numeric codes first, then numbers by value.
pub fn consolidated_order(left: &CrId, right: &CrId) -> Ordering {
    match (left.is_numeric(), right.is_numeric()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => left.as_str().cmp(right.as_str()),
        // Canonical numeric ids have no leading zeros, so length orders first.
        (true, true) => left
            .as_str()
            .len()
            .cmp(&right.as_str().len())
            .then_with(|| left.as_str().cmp(right.as_str())),
    }
}

/// Renders the consolidated report into `out`.
pub fn write_consolidated<W: Write>(
    mut out: W,
    header: &ReportHeader,
    work: &WorkByCr,
    registry: &Registry,
) -> ExportResult<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    let separator = "-".repeat(SECTION_WIDTH);

    writeln!(out, "{banner}")?;
    writeln!(out, "{} - Consolidated CR Status Report", header.team_label)?;
    writeln!(out, "Generated: {}", header.generated_at)?;
    writeln!(out, "Source: Weekly Status Reports")?;
    writeln!(out, "Total CRs with Activity: {}", work.len())?;
    writeln!(out, "Team Members: {}", header.team_size)?;
    writeln!(out, "{banner}")?;
    writeln!(out)?;
    writeln!(
        out,
        "This report consolidates individual status updates by CR number,"
    )?;
    writeln!(
        out,
        "showing all team member contributions for each active CR."
    )?;
    writeln!(out)?;

    let mut ids: Vec<&CrId> = work.keys().collect();
    ids.sort_by(|a, b| consolidated_order(a, b));

    for id in ids {
        writeln!(out, "{separator}")?;
        writeln!(out)?;
        match registry.title(id) {
            Some(title) => writeln!(out, "CR {id} - {title}")?,
            None => writeln!(out, "CR {id}")?,
        }
        for contribution in &work[id] {
            writeln!(out, "{} - ", contribution.person)?;
            for line in contribution.description.lines() {
                writeln!(out, "{INDENT}{line}")?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "{separator}")?;
    out.flush()?;
    Ok(())
}

/// Writes the consolidated report to `path`, replacing any previous file.
pub fn export_consolidated(
    path: &Path,
    header: &ReportHeader,
    work: &WorkByCr,
    registry: &Registry,
) -> ExportResult<()> {
    let file = std::fs::File::create(path)?;
    write_consolidated(std::io::BufWriter::new(file), header, work, registry)
}

#[cfg(test)]
mod tests {
    use super::{consolidated_order, group_by_cr, write_consolidated, ReportHeader};
    use crate::model::cr_id::CrId;
    use crate::registry::Registry;
    use std::collections::BTreeMap;

    fn id(raw: &str) -> CrId {
        CrId::normalize(raw).expect("fixture id should normalize")
    }

    #[test]
    fn ordering_puts_codes_first_then_numbers_by_value() {
        let mut ids = vec![id("100"), id("FOD01"), id("9"), id("A__II"), id("84492")];
        ids.sort_by(consolidated_order);
        let rendered: Vec<&str> = ids.iter().map(CrId::as_str).collect();
        assert_eq!(rendered, vec!["A__II", "FOD01", "9", "100", "84492"]);
    }

    #[test]
    fn grouping_keeps_contributor_order() {
        let bob = BTreeMap::from([(id("1"), "CR 1 bob work".to_string())]);
        let ann = BTreeMap::from([
            (id("1"), "CR 1 ann work".to_string()),
            (id("2"), "CR 2 ann only".to_string()),
        ]);
        let grouped = group_by_cr([("Bob", &bob), ("Ann", &ann)]);

        let people: Vec<&str> = grouped[&id("1")]
            .iter()
            .map(|c| c.person.as_str())
            .collect();
        assert_eq!(people, vec!["Bob", "Ann"]);
        assert_eq!(grouped[&id("2")].len(), 1);
    }

    #[test]
    fn renders_sections_with_titles_and_indentation() {
        let bob = BTreeMap::from([(id("84492"), "CR 84492 Design\n- drafted ICD".to_string())]);
        let work = group_by_cr([("Bob", &bob)]);
        let registry = Registry::from_lines(
            ["CR 84492 Design"],
            Some(["CR 84492 Design: Artemis"]),
        );
        let header = ReportHeader {
            team_label: "Models Team".to_string(),
            generated_at: "January 05, 2026 at 09:30 AM".to_string(),
            team_size: 2,
        };

        let mut out = Vec::new();
        write_consolidated(&mut out, &header, &work, &registry).expect("report should render");
        let text = String::from_utf8(out).expect("report should be UTF-8");

        assert!(text.starts_with(&"=".repeat(65)));
        assert!(text.contains("Models Team - Consolidated CR Status Report\n"));
        assert!(text.contains("Generated: January 05, 2026 at 09:30 AM\n"));
        assert!(text.contains("Total CRs with Activity: 1\n"));
        assert!(text.contains("Team Members: 2\n"));
        assert!(text.contains(
            "CR 84492 - Design: Artemis\nBob - \n    CR 84492 Design\n    - drafted ICD\n"
        ));
        assert!(text.ends_with(&format!("{}\n", "-".repeat(53))));
    }
}
