//! Per-CR work description extraction.
//!
//! # Invariants
//! - A block starts at an accepted status line and includes that line.
//! - A block ends before the next `CR <token>` line, accepted or not, or at
//!   a run of two or more blank lines. Single blank lines inside a block are
//!   kept.
//! - When one CR has several blocks in a report, the last block wins.

use crate::model::cr_id::CrId;
use crate::parse::line::{classify_status_line, split_cr_line};
use std::collections::BTreeMap;

const SECTION_BREAK_BLANK_LINES: usize = 2;

/// Extracts `identifier -> work description` from one status report.
pub fn extract_work_details(report_text: &str) -> BTreeMap<CrId, String> {
    let lines: Vec<&str> = report_text.lines().collect();
    let mut details = BTreeMap::new();

    let mut index = 0;
    while index < lines.len() {
        let head = lines[index].trim();
        let Some(mention) = classify_status_line(head) else {
            index += 1;
            continue;
        };

        let mut block: Vec<&str> = vec![head];
        index += 1;
        while index < lines.len() {
            let next = lines[index];
            if split_cr_line(next).is_some() {
                break;
            }
            if next.trim().is_empty() {
                if blank_run_len(&lines[index..]) >= SECTION_BREAK_BLANK_LINES {
                    break;
                }
                if block.last().is_some_and(|last| !last.trim().is_empty()) {
                    block.push("");
                }
            } else {
                block.push(next);
            }
            index += 1;
        }

        let description = block.join("\n").trim().to_string();
        if !description.is_empty() {
            details.insert(mention.id, description);
        }
    }

    details
}

fn blank_run_len(lines: &[&str]) -> usize {
    lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::extract_work_details;
    use crate::model::cr_id::CrId;

    fn id(raw: &str) -> CrId {
        CrId::normalize(raw).expect("fixture id should normalize")
    }

    #[test]
    fn block_runs_until_next_cr_line() {
        let text = "Status for week 12\n\
                    CR 84492 Design\n\
                    \x20 - reviewed interfaces\n\
                    \n\
                    \x20 - updated ICD\n\
                    CR 000083875 Test\n\
                    \x20 - ran regression\n";
        let details = extract_work_details(text);

        assert_eq!(details.len(), 2);
        assert_eq!(
            details[&id("84492")],
            "CR 84492 Design\n  - reviewed interfaces\n\n  - updated ICD"
        );
        assert_eq!(details[&id("83875")], "CR 000083875 Test\n  - ran regression");
    }

    #[test]
    fn double_blank_line_ends_block() {
        let text = "CR 1 First\nline a\n\n\nunrelated footer\n";
        let details = extract_work_details(text);
        assert_eq!(details[&id("1")], "CR 1 First\nline a");
    }

    #[test]
    fn rejected_tokens_do_not_start_blocks() {
        let text = "CR misc stuff\nmore\nCR A__II\nwork on A2\n";
        let details = extract_work_details(text);
        assert_eq!(details.len(), 1);
        assert_eq!(details[&id("A__II")], "CR A__II\nwork on A2");
    }

    #[test]
    fn rejected_cr_line_still_closes_previous_block() {
        let text = "CR 84492 Design\n- drafted ICD\nCR misc notes\n- lunch and learn\n";
        let details = extract_work_details(text);
        assert_eq!(details.len(), 1);
        assert_eq!(details[&id("84492")], "CR 84492 Design\n- drafted ICD");
    }

    #[test]
    fn later_block_replaces_earlier_for_same_identifier() {
        let text = "CR 5 early\n\n\nCR 0005 late\n";
        let details = extract_work_details(text);
        assert_eq!(details[&id("5")], "CR 0005 late");
    }
}
