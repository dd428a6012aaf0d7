//! Durable reference-list storage.
//!
//! # Responsibility
//! - Append discovered identifiers to the reference list.
//! - Keep file I/O details out of reconciliation logic.
//!
//! # Invariants
//! - Appends never rewrite existing lines.
//! - Each appended identifier starts on its own line.
//! - Appended lines use the encoding the existing file decodes as.

use super::discovered_line;
use crate::input::{decode_text, encode_text, TextEncoding};
use crate::model::cr_id::CrId;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Failure while persisting registry additions.
#[derive(Debug)]
pub enum RegistryError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to append to `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Storage interface for reference-list additions.
pub trait RegistryStore {
    /// Appends identifiers in the given order.
    fn append(&mut self, ids: &[CrId]) -> RegistryResult<()>;
}

/// Reference list stored as a plain text file.
#[derive(Debug, Clone)]
pub struct FileRegistryStore {
    path: PathBuf,
}

impl FileRegistryStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn append_lines(&self, ids: &[CrId]) -> std::io::Result<()> {
        // Why: bytes in a different encoding would make the whole list
        // undecodable on the next load, not just the appended lines.
        let (encoding, needs_newline) = match std::fs::read(&self.path) {
            Ok(bytes) => {
                let decoded = decode_text(&bytes);
                let open_line = !decoded.text.is_empty() && !decoded.text.ends_with('\n');
                (decoded.encoding, open_line)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => (TextEncoding::Utf8, false),
            Err(err) => return Err(err),
        };

        let mut payload = String::new();
        if needs_newline {
            payload.push('\n');
        }
        for id in ids {
            payload.push_str(&discovered_line(id));
            payload.push('\n');
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(&encode_text(&payload, encoding))?;
        file.flush()
    }

    fn io_error(&self, source: std::io::Error) -> RegistryError {
        RegistryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RegistryStore for FileRegistryStore {
    fn append(&mut self, ids: &[CrId]) -> RegistryResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        match self.append_lines(ids) {
            Ok(()) => {
                info!(
                    "event=registry_append module=registry status=ok count={} path={}",
                    ids.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=registry_append module=registry status=error count={} path={} error={}",
                    ids.len(),
                    self.path.display(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileRegistryStore, RegistryStore};
    use crate::input::{read_text_file, TextEncoding};
    use crate::model::cr_id::CrId;

    fn ids(raw: &[&str]) -> Vec<CrId> {
        raw.iter().map(|r| CrId::normalize(r).expect("fixture id should normalize")).collect()
    }

    #[test]
    fn append_adds_one_line_per_identifier() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("Models_CR_List.txt");
        std::fs::write(&path, "CR 84492 Design\n").expect("fixture should be written");

        let mut store = FileRegistryStore::new(&path);
        store.append(&ids(&["83875", "A__II"])).expect("append should succeed");

        let content = std::fs::read_to_string(&path).expect("file should be readable");
        assert_eq!(
            content,
            "CR 84492 Design\nCR 83875 [Found in status emails]\nCR A__II [Found in status emails]\n"
        );
    }

    #[test]
    fn append_starts_on_new_line_when_file_lacks_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "CR 1 One").expect("fixture should be written");

        let mut store = FileRegistryStore::new(&path);
        store.append(&ids(&["2"])).expect("append should succeed");

        let content = std::fs::read_to_string(&path).expect("file should be readable");
        assert_eq!(content, "CR 1 One\nCR 2 [Found in status emails]\n");
    }

    #[test]
    fn append_keeps_utf16_reference_list_in_utf16() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("Models_CR_List.txt");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "CR 84492 Design".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).expect("fixture should be written");

        let mut store = FileRegistryStore::new(&path);
        store.append(&ids(&["83875"])).expect("append should succeed");

        let decoded = read_text_file(&path).expect("reference list should be readable");
        assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
        assert_eq!(
            decoded.text,
            "CR 84492 Design\nCR 83875 [Found in status emails]\n"
        );
    }

    #[test]
    fn append_with_no_identifiers_does_not_touch_file() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("absent.txt");

        let mut store = FileRegistryStore::new(&path);
        store.append(&[]).expect("append should succeed");
        assert!(!path.exists());
    }

    #[test]
    fn append_reports_io_failure() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("missing-dir").join("list.txt");

        let mut store = FileRegistryStore::new(&path);
        let err = store.append(&ids(&["5"])).expect_err("append should fail");
        assert!(err.to_string().contains("failed to append"));
    }
}
