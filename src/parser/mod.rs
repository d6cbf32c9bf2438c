//! Parser layer
//! - error.rs: ParseError for unreadable manifests
//! - requirement.rs: a single pinned requirement line
//! - requirements_txt.rs: requirements.txt parser with `-r` includes

pub mod error;
pub mod requirement;
pub mod requirements_txt;

pub use error::ParseError;
pub use requirement::{Requirement, RequirementError};
pub use requirements_txt::RequirementsParser;
