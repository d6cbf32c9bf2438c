//! Shared test utilities

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod registry;

pub use fixtures::ManifestDir;
pub use registry::{MockRegistry, date};
