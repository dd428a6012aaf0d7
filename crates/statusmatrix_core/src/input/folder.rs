//! Run-folder discovery.

use super::{InputError, InputResult};
use crate::config::RunConfig;
use std::path::{Path, PathBuf};

/// Resolved input paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub reference: PathBuf,
    pub metadata: Option<PathBuf>,
    pub roster: PathBuf,
}

impl InputFiles {
    /// Resolves inputs and fails fast when a required one is absent.
    pub fn locate(config: &RunConfig) -> InputResult<Self> {
        if !config.folder.is_dir() {
            return Err(InputError::NotADirectory(config.folder.clone()));
        }

        let reference = config.reference_path();
        if !reference.is_file() {
            return Err(InputError::MissingFile(reference));
        }
        let roster = config.roster_path();
        if !roster.is_file() {
            return Err(InputError::MissingFile(roster));
        }
        let metadata = Some(config.metadata_path()).filter(|path| path.is_file());

        Ok(Self {
            reference,
            metadata,
            roster,
        })
    }
}

/// Lists candidate report files, sorted by file name.
pub fn list_report_files(config: &RunConfig) -> InputResult<Vec<PathBuf>> {
    let io_error = |source| InputError::Io {
        path: config.folder.clone(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&config.folder).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if config.is_report_file_name(file_name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Returns roster names: trimmed, non-blank lines in file order.
pub fn load_roster(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Person name for a report file: the file stem.
pub fn person_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
