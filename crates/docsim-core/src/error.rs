//! Typed ingestion failures

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while reading and decoding an input file.
///
/// There are no partial results: any variant means no frequency map was
/// produced for that file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be opened, stat'ed, or read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content decoded under neither UTF-8 nor the legacy fallback
    #[error("{} is not valid UTF-8 or {fallback} text", path.display())]
    Decode { path: PathBuf, fallback: &'static str },
}

impl IngestError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
