//! Run configuration.
//!
//! # Responsibility
//! - Hold the run folder and the well-known artifact file names.
//!
//! # Invariants
//! - File names are relative to `folder`.
//! - Every file name here starts with `Models_` or is excluded explicitly
//!   from report discovery, so inputs are never scanned as reports.

use std::path::{Path, PathBuf};

pub const DEFAULT_REFERENCE_FILE: &str = "Models_CR_List.txt";
pub const DEFAULT_METADATA_FILE: &str = "Models_CR_Titles.txt";
pub const DEFAULT_ROSTER_FILE: &str = "Models_Group.txt";
pub const DEFAULT_TABLE_FILE: &str = "Models_CR_Worked.csv";
pub const DEFAULT_CONSOLIDATED_FILE: &str = "Consolidated_Status_Report.txt";
pub const DEFAULT_TEAM_LABEL: &str = "Models Team";
/// File-name prefix reserved for inputs and outputs.
pub const RESERVED_PREFIX: &str = "Models_";
pub const REPORT_EXTENSION: &str = "txt";

/// Options for one batch run over a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub folder: PathBuf,
    pub reference_file: String,
    pub metadata_file: String,
    pub roster_file: String,
    pub table_file: String,
    pub consolidated_file: String,
    /// Whether to write the consolidated per-CR report.
    pub consolidated: bool,
    /// Banner label for the consolidated report.
    pub team_label: String,
    /// Fixed banner timestamp; `None` uses the local clock.
    pub generated_at: Option<String>,
}

impl RunConfig {
    /// Creates a configuration with default file names.
    pub fn new(folder: impl AsRef<Path>) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            reference_file: DEFAULT_REFERENCE_FILE.to_string(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            roster_file: DEFAULT_ROSTER_FILE.to_string(),
            table_file: DEFAULT_TABLE_FILE.to_string(),
            consolidated_file: DEFAULT_CONSOLIDATED_FILE.to_string(),
            consolidated: false,
            team_label: DEFAULT_TEAM_LABEL.to_string(),
            generated_at: None,
        }
    }

    pub fn with_consolidated(mut self, enabled: bool) -> Self {
        self.consolidated = enabled;
        self
    }

    pub fn with_team_label(mut self, label: impl Into<String>) -> Self {
        self.team_label = label.into();
        self
    }

    pub fn with_generated_at(mut self, generated_at: impl Into<String>) -> Self {
        self.generated_at = Some(generated_at.into());
        self
    }

    pub fn reference_path(&self) -> PathBuf {
        self.folder.join(&self.reference_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.folder.join(&self.metadata_file)
    }

    pub fn roster_path(&self) -> PathBuf {
        self.folder.join(&self.roster_file)
    }

    pub fn table_path(&self) -> PathBuf {
        self.folder.join(&self.table_file)
    }

    pub fn consolidated_path(&self) -> PathBuf {
        self.folder.join(&self.consolidated_file)
    }

    /// Returns whether `file_name` names a status report candidate.
    pub fn is_report_file_name(&self, file_name: &str) -> bool {
        let is_txt = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == REPORT_EXTENSION);
        is_txt
            && !file_name.starts_with(RESERVED_PREFIX)
            && file_name != self.reference_file
            && file_name != self.metadata_file
            && file_name != self.roster_file
            && file_name != self.consolidated_file
    }
}
