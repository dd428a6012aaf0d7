//! Known CR registry and title metadata.
//!
//! # Responsibility
//! - Load the known identifier set from reference-list lines.
//! - Load optional identifier titles from metadata lines.
//! - Expose title lookups with a stable placeholder fallback.
//!
//! # Invariants
//! - Registry lines use the lenient classification policy.
//! - Titles are never backfilled for identifiers appended by discovery.
//!
//! # See also
//! - `store` for durable appends to the reference list.

pub mod store;

use crate::model::cr_id::CrId;
use crate::parse::line::classify_registry_line;
use std::collections::{BTreeMap, BTreeSet};

pub use store::{FileRegistryStore, RegistryError, RegistryResult, RegistryStore};

/// Title shown for identifiers without metadata.
pub const TITLE_PLACEHOLDER: &str = "[Title not available - found in status emails]";

/// Marker written after identifiers appended by discovery.
pub const DISCOVERED_MARKER: &str = "[Found in status emails]";

/// In-memory view of known identifiers and their titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    known: BTreeSet<CrId>,
    titles: BTreeMap<CrId, String>,
}

impl Registry {
    /// Builds a registry from reference-list lines and optional metadata lines.
    pub fn from_lines<'a, R, M>(reference_lines: R, metadata_lines: Option<M>) -> Self
    where
        R: IntoIterator<Item = &'a str>,
        M: IntoIterator<Item = &'a str>,
    {
        Self {
            known: load_known(reference_lines),
            titles: metadata_lines.map(load_titles).unwrap_or_default(),
        }
    }

    pub fn known(&self) -> &BTreeSet<CrId> {
        &self.known
    }

    pub fn titles(&self) -> &BTreeMap<CrId, String> {
        &self.titles
    }

    /// Returns the metadata title or [`TITLE_PLACEHOLDER`].
    pub fn title_for(&self, id: &CrId) -> &str {
        self.title(id).unwrap_or(TITLE_PLACEHOLDER)
    }

    /// Returns the metadata title only when one was loaded.
    pub fn title(&self, id: &CrId) -> Option<&str> {
        self.titles.get(id).map(String::as_str)
    }

    /// Marks identifiers as known after they were persisted.
    pub fn extend_known(&mut self, ids: impl IntoIterator<Item = CrId>) {
        self.known.extend(ids);
    }
}

/// Collects canonical identifiers from reference-list lines.
pub fn load_known<'a>(lines: impl IntoIterator<Item = &'a str>) -> BTreeSet<CrId> {
    lines
        .into_iter()
        .filter_map(classify_registry_line)
        .map(|mention| mention.id)
        .collect()
}

/// Collects `identifier -> title` from metadata lines.
///
/// Lines without a remainder contribute no title. The last line wins for a
/// repeated identifier.
pub fn load_titles<'a>(lines: impl IntoIterator<Item = &'a str>) -> BTreeMap<CrId, String> {
    let mut titles = BTreeMap::new();
    for mention in lines.into_iter().filter_map(classify_registry_line) {
        if mention.remainder.is_empty() {
            continue;
        }
        titles.insert(mention.id, mention.remainder.to_string());
    }
    titles
}

/// Formats the reference-list line appended for a discovered identifier.
pub fn discovered_line(id: &CrId) -> String {
    format!("CR {id} {DISCOVERED_MARKER}")
}
