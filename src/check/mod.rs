//! Check orchestration layer
//!
//! Ties the manifest parser, the registry and the staleness checker
//! together for a whole run.
//!
//! # Modules
//!
//! - [`runner`]: Concurrent per-requirement checks and aggregation
//! - [`report`]: Text and JSON rendering of the results

pub mod report;
pub mod runner;

pub use report::{OutputFormat, write_report};
pub use runner::{CheckSummary, check_requirements};
