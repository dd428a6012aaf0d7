//! Domain model for change request tracking.
//!
//! # Responsibility
//! - Define canonical identifier types shared by parsing, registry and
//!   matrix code.
//!
//! # Invariants
//! - Every comparison between CR mentions goes through `CrId`, never raw text.

pub mod cr_id;
