//! Registry implementations for resolving package releases

pub mod pypi;

pub use pypi::PypiRegistry;
