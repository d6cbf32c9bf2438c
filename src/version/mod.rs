//! Version layer for package staleness checking
//!
//! This module provides the core functionality for resolving releases from
//! a registry, comparing versions and deciding whether a pin has rotted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│ ReleaseInfo │────▶│   Checker   │
//! │  (fetch)    │     │(version+date│     │ (evaluate)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │  Registries │                         │    Loose    │
//! │   (pypi)    │                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Staleness evaluation and verdict messages
//! - [`loose`]: Lenient version parsing and comparison
//! - [`registry`]: Registry trait for resolving releases
//! - [`registries`]: Concrete registry implementations (PyPI)
//! - [`resolver`]: Latest version selection for unpinned lookups
//! - [`error`]: Error types for registry operations
//! - [`types`]: Common types like `ReleaseInfo`

pub mod checker;
pub mod error;
pub mod loose;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod types;

pub use loose::Version;
