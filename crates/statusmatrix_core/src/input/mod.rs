//! Input discovery and decoding.
//!
//! # Responsibility
//! - Locate required and optional inputs inside the run folder.
//! - Decode text files under a prioritized list of encodings.
//! - Load the team roster.
//!
//! # Invariants
//! - Missing required inputs are reported before any report is scanned.
//! - Output artifacts and `Models_`-prefixed files are never treated as
//!   status reports.

pub mod decode;
pub mod folder;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use decode::{decode_text, encode_text, read_text_file, DecodedText, TextEncoding};
pub use folder::{list_report_files, load_roster, person_name, InputFiles};

pub type InputResult<T> = Result<T, InputError>;

#[derive(Debug)]
pub enum InputError {
    NotADirectory(PathBuf),
    MissingFile(PathBuf),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory(path) => write!(f, "`{}` is not a valid directory", path.display()),
            Self::MissingFile(path) => write!(f, "required input not found: {}", path.display()),
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotADirectory(_) | Self::MissingFile(_) => None,
        }
    }
}
