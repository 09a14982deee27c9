//! Dataset error types.

use crate::domain::DataError;

/// Errors that can occur while loading the deal dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading a local file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote server returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Document is not valid JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A deal record is malformed
    #[error(transparent)]
    Data(#[from] DataError),
}
