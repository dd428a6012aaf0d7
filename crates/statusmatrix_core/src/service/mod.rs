//! Run orchestration.
//!
//! # Responsibility
//! - Compose input, scan, reconcile and export steps into one batch run.
//! - Keep the CLI free of business rules.

pub mod pipeline;
pub mod summary;
