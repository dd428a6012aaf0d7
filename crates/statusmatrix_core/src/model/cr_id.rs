//! Change request identifier model.
//!
//! # Responsibility
//! - Canonicalize raw CR tokens into one comparable key.
//!
//! # Invariants
//! - A `CrId` can only be built through [`CrId::normalize`].
//! - Normalization is idempotent: normalizing a canonical id yields itself.
//! - Numeric ids carry no leading zeros (`"0"` stays `"0"`).

use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Canonical change request identifier.
///
/// Ordering is plain string ordering over the canonical form, which fixes the
/// column order of the assignment matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CrId(String);

impl CrId {
    /// Normalizes a raw token into a canonical identifier.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let upper = trimmed.to_uppercase();
        if upper.bytes().all(|b| b.is_ascii_digit()) {
            let stripped = upper.trim_start_matches('0');
            let canonical = if stripped.is_empty() { "0" } else { stripped };
            return Some(Self(canonical.to_string()));
        }
        Some(Self(upper))
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the canonical form is purely decimal.
    pub fn is_numeric(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Column label used in exported tables, e.g. `CR 87893`.
    pub fn label(&self) -> String {
        format!("CR {}", self.0)
    }
}

impl Display for CrId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CrId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CrId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Convenience wrapper over [`CrId::normalize`].
pub fn normalize(raw: &str) -> Option<CrId> {
    CrId::normalize(raw)
}
