//! Core logic for the CR status matrix.
//! This crate is the single source of truth for extraction, reconciliation
//! and export rules.

pub mod config;
pub mod export;
pub mod input;
pub mod logging;
pub mod matrix;
pub mod model;
pub mod parse;
pub mod reconcile;
pub mod registry;
pub mod scan;
pub mod service;

pub use config::RunConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use matrix::AssignmentMatrix;
pub use model::cr_id::{normalize, CrId};
pub use parse::line::{classify_registry_line, classify_status_line, CrMention};
pub use reconcile::{reconcile, reconcile_and_persist, PersistOutcome, Reconciliation};
pub use registry::{FileRegistryStore, Registry, RegistryError, RegistryStore};
pub use scan::report::scan;
pub use service::pipeline::{run_folder, run_with_store, PipelineError, PipelineResult};
pub use service::summary::{MemberAssignments, ReportOutcome, RunSummary};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
