//! Error types for snippet operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting, parsing or compiling snippets
#[derive(Debug, Error)]
pub enum SnippetError {
    /// Definition text lacks the `---` delimiter pair
    #[error("malformed definition: expected a `---` header block followed by a `---` line")]
    MalformedDefinition,
    /// A header line is neither blank nor `key: value`
    #[error("malformed header line {line}: {text:?}")]
    MalformedHeaderLine { line: usize, text: String },
    /// Compiling requires a `uuid` in the header
    #[error("snippet for {} is missing uuid", path.display())]
    MissingIdentity { path: PathBuf },
    /// The `uuid` cannot be used in an artifact file name
    #[error("snippet for {} has an unusable uuid {uuid:?}", path.display())]
    InvalidIdentity { path: PathBuf, uuid: String },
    /// Extraction needs at least one selection
    #[error("no selection to extract a snippet from")]
    NoSelection,
    /// Selections are out of range or overlapping
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    /// Filesystem failure on a specific path
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Error while serializing or reading back a compiled artifact
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnippetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SnippetError::Io {
            path: path.into(),
            source,
        }
    }
}
