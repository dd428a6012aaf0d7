//! Batch pipeline over one run folder.
//!
//! # Responsibility
//! - Load registry, metadata and roster.
//! - Scan every report first, then reconcile once, then export.
//!
//! # Invariants
//! - Only missing or unreadable required inputs and output write failures
//!   abort the run.
//! - The registry store is appended to at most once, after the scan phase.
//! - Unreadable reports are skipped; their authors keep all-blank rows.

use crate::config::RunConfig;
use crate::export::consolidated::{export_consolidated, group_by_cr, ReportHeader};
use crate::export::table::export_table;
use crate::export::ExportError;
use crate::input::{
    list_report_files, load_roster, person_name, read_text_file, InputError, InputFiles,
};
use crate::matrix::AssignmentMatrix;
use crate::model::cr_id::CrId;
use crate::reconcile::{reconcile_and_persist, PersistOutcome};
use crate::registry::{FileRegistryStore, Registry, RegistryStore};
use crate::scan::report::scan;
use crate::scan::work::extract_work_details;
use crate::service::summary::{member_assignments, ReportOutcome, RunSummary};
use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const BANNER_TIME_FORMAT: &str = "%B %d, %Y at %I:%M %p";

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal run errors.
#[derive(Debug)]
pub enum PipelineError {
    /// Folder, reference list or roster is absent or unreadable.
    MissingInput(InputError),
    /// The report folder could not be listed.
    Input(InputError),
    /// An output artifact could not be written.
    Export { path: PathBuf, source: ExportError },
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingInput(err) => write!(f, "{err}"),
            Self::Input(err) => write!(f, "{err}"),
            Self::Export { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingInput(err) | Self::Input(err) => Some(err),
            Self::Export { source, .. } => Some(source),
        }
    }
}

/// One report after the scan phase.
#[derive(Debug, Clone)]
struct ScannedReport {
    person: String,
    file: PathBuf,
    encoding: Option<&'static str>,
    crs: BTreeSet<CrId>,
    details: BTreeMap<CrId, String>,
}

/// Runs the pipeline against the folder's own reference list.
pub fn run_folder(config: &RunConfig) -> PipelineResult<RunSummary> {
    let files = InputFiles::locate(config).map_err(PipelineError::MissingInput)?;
    let mut store = FileRegistryStore::new(&files.reference);
    run_with_store(config, &files, &mut store)
}

/// Runs the pipeline with a caller-provided registry store.
pub fn run_with_store<S: RegistryStore>(
    config: &RunConfig,
    files: &InputFiles,
    store: &mut S,
) -> PipelineResult<RunSummary> {
    let started_at = Instant::now();
    info!(
        "event=run module=pipeline status=start folder={}",
        config.folder.display()
    );

    let reference_text = read_required(&files.reference)?;
    let metadata_text = files.metadata.as_deref().and_then(read_optional);
    let metadata_loaded = metadata_text.is_some();
    if files.metadata.is_none() {
        info!("event=metadata_load module=pipeline status=skip reason=absent");
    }
    let mut registry = Registry::from_lines(
        reference_text.lines(),
        metadata_text.as_deref().map(str::lines),
    );
    info!(
        "event=registry_load module=pipeline status=ok known={} titles={}",
        registry.known().len(),
        registry.titles().len()
    );

    let team = load_roster(&read_required(&files.roster)?);
    info!(
        "event=roster_load module=pipeline status=ok members={}",
        team.len()
    );

    let report_files = list_report_files(config).map_err(PipelineError::Input)?;
    let summary = run_reports(
        config,
        &mut registry,
        team,
        &report_files,
        store,
        metadata_loaded,
    )?;
    info!(
        "event=run module=pipeline status=ok duration_ms={} reports={} skipped={} new={}",
        started_at.elapsed().as_millis(),
        summary.reports.len(),
        summary.reports_skipped(),
        summary.new_crs.len()
    );
    Ok(summary)
}

/// Scan, reconcile and export phases over an already listed set of reports.
fn run_reports<S: RegistryStore>(
    config: &RunConfig,
    registry: &mut Registry,
    team: Vec<String>,
    report_files: &[PathBuf],
    store: &mut S,
    metadata_loaded: bool,
) -> PipelineResult<RunSummary> {
    let scanned: Vec<ScannedReport> = report_files
        .iter()
        .map(|path| scan_report(path, config.consolidated))
        .collect();

    let discovered: BTreeSet<CrId> = scanned
        .iter()
        .flat_map(|report| report.crs.iter().cloned())
        .collect();
    // Why: appending only after every report is scanned keeps one run to a
    // single sorted batch, whatever the report order.
    let known_before = registry.known().len();
    let (reconciliation, outcome) = reconcile_and_persist(registry, &discovered, store);

    let per_person: HashMap<String, BTreeSet<CrId>> = scanned
        .iter()
        // Skipped reports leave their author without an entry, so the row stays blank.
        .filter(|report| report.encoding.is_some())
        .map(|report| (report.person.clone(), report.crs.clone()))
        .collect();
    let matrix = AssignmentMatrix::build(&team, &reconciliation.universe, &per_person);

    let table_path = config.table_path();
    export_table(&table_path, registry, &matrix).map_err(|source| {
        PipelineError::Export {
            path: table_path.clone(),
            source,
        }
    })?;
    info!(
        "event=export_table module=pipeline status=ok path={} rows={} columns={}",
        table_path.display(),
        matrix.rows().len(),
        matrix.universe().len()
    );

    let consolidated_path = if config.consolidated {
        Some(write_consolidated_report(config, &team, &scanned, registry)?)
    } else {
        None
    };

    let summary = RunSummary {
        team,
        reports: scanned
            .into_iter()
            .map(|report| ReportOutcome {
                person: report.person,
                file: report.file,
                encoding: report.encoding,
                crs: report.crs.into_iter().collect(),
            })
            .collect(),
        known_before,
        new_crs: reconciliation.new,
        universe: reconciliation.universe,
        registry_persisted: outcome.is_persisted(),
        registry_error: match &outcome {
            PersistOutcome::Failed(err) => Some(err.to_string()),
            _ => None,
        },
        metadata_loaded,
        assignments: member_assignments(&matrix),
        table_path,
        consolidated_path,
    };
    Ok(summary)
}

fn read_required(path: &Path) -> PipelineResult<String> {
    read_text_file(path)
        .map(|decoded| decoded.text)
        .map_err(|source| {
            PipelineError::MissingInput(InputError::Io {
                path: path.to_path_buf(),
                source,
            })
        })
}

fn read_optional(path: &Path) -> Option<String> {
    match read_text_file(path) {
        Ok(decoded) => Some(decoded.text),
        Err(err) => {
            warn!(
                "event=metadata_load module=pipeline status=skip path={} error={}",
                path.display(),
                err
            );
            None
        }
    }
}

fn scan_report(path: &Path, with_details: bool) -> ScannedReport {
    let person = person_name(path);
    match read_text_file(path) {
        Ok(decoded) => {
            let crs = scan(&decoded.text);
            let details = if with_details {
                extract_work_details(&decoded.text)
            } else {
                BTreeMap::new()
            };
            info!(
                "event=report_scan module=pipeline status=ok person={} encoding={} crs={}",
                person,
                decoded.encoding.as_str(),
                crs.len()
            );
            ScannedReport {
                person,
                file: path.to_path_buf(),
                encoding: Some(decoded.encoding.as_str()),
                crs,
                details,
            }
        }
        Err(err) => {
            warn!(
                "event=report_scan module=pipeline status=skip person={} path={} error={}",
                person,
                path.display(),
                err
            );
            ScannedReport {
                person,
                file: path.to_path_buf(),
                encoding: None,
                crs: BTreeSet::new(),
                details: BTreeMap::new(),
            }
        }
    }
}

fn write_consolidated_report(
    config: &RunConfig,
    team: &[String],
    scanned: &[ScannedReport],
    registry: &Registry,
) -> PipelineResult<PathBuf> {
    // Roster members first, in roster order; unlisted authors follow.
    let mut ordered: Vec<&ScannedReport> = Vec::with_capacity(scanned.len());
    for name in team {
        if ordered.iter().any(|report| &report.person == name) {
            continue;
        }
        ordered.extend(scanned.iter().find(|report| &report.person == name));
    }
    for report in scanned {
        if !team.contains(&report.person) {
            ordered.push(report);
        }
    }

    let work = group_by_cr(
        ordered
            .iter()
            .map(|report| (report.person.as_str(), &report.details)),
    );
    let header = ReportHeader {
        team_label: config.team_label.clone(),
        generated_at: config
            .generated_at
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format(BANNER_TIME_FORMAT).to_string()),
        team_size: team.len(),
    };

    let path = config.consolidated_path();
    export_consolidated(&path, &header, &work, registry).map_err(|source| {
        PipelineError::Export {
            path: path.clone(),
            source,
        }
    })?;
    info!(
        "event=export_consolidated module=pipeline status=ok path={} crs={}",
        path.display(),
        work.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{run_reports, scan_report};
    use crate::config::RunConfig;
    use crate::registry::{FileRegistryStore, Registry};
    use std::path::Path;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).expect("fixture should be written");
    }

    #[test]
    fn unreadable_report_is_skipped_without_identifiers() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let report = scan_report(&dir.path().join("Nadia.txt"), true);

        assert_eq!(report.person, "Nadia");
        assert_eq!(report.encoding, None);
        assert!(report.crs.is_empty());
        assert!(report.details.is_empty());
    }

    #[test]
    fn unreadable_report_leaves_author_row_blank() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        write(dir.path(), "Models_CR_List.txt", "CR 84492 Design\n");
        write(dir.path(), "Bob.txt", "CR 84492 Design: ICD\nCR 83875\n");
        let config = RunConfig::new(dir.path());
        let mut registry = Registry::from_lines(["CR 84492 Design"], None::<Vec<&str>>);
        let mut store = FileRegistryStore::new(config.reference_path());
        let team = vec!["Nadia".to_string(), "Bob".to_string()];
        let reports = [dir.path().join("Bob.txt"), dir.path().join("Nadia.txt")];

        let summary = run_reports(&config, &mut registry, team, &reports, &mut store, false)
            .expect("run should succeed");

        assert_eq!(summary.reports_skipped(), 1);
        assert_eq!(summary.assignments[0].name, "Nadia");
        assert!(summary.assignments[0].crs.is_empty());
        assert_eq!(summary.assignments[1].crs.len(), 2);
        assert_eq!(summary.universe.len(), 2);
    }
}
