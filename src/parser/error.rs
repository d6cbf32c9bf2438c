//! Error type for manifest parsing

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A manifest, or a file it includes, could not be read
    #[error("Failed to read requirements file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
