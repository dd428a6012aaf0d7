//! Output artifact writers.
//!
//! # Responsibility
//! - Serialize the assignment matrix as a two-header CSV table.
//! - Render the consolidated per-CR work report.
//!
//! # Invariants
//! - Writers never reorder rows or columns; ordering is decided upstream.

pub mod consolidated;
pub mod table;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ExportResult<T> = Result<T, ExportError>;

/// Failure while writing an output artifact.
#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
