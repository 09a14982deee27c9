//! Domain error types.
//!
//! These errors represent malformed deal data found while building the
//! graph. They are distinct from dataset I/O errors.

/// A deal record that cannot become an edge of the graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    /// A required field is absent
    #[error("deal {deal}: missing required field `{field}`")]
    MissingField { deal: String, field: &'static str },

    /// A field is present but its value is unusable
    #[error("deal {deal}: invalid `{field}`: {reason}")]
    InvalidField {
        deal: String,
        field: &'static str,
        reason: String,
    },

    /// Two deals share a reference
    #[error("duplicate deal reference {0}")]
    DuplicateReference(String),
}
