use rootcast_types::HashRef;

use crate::node::NodeKind;

/// Errors from content store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested node was not found.
    #[error("node not found: {0}")]
    NotFound(HashRef),

    /// The loaded node is not of the expected kind.
    #[error("shape mismatch for {reference}: expected {expected}, got {actual}")]
    ShapeMismatch {
        reference: HashRef,
        expected: NodeKind,
        actual: NodeKind,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Attempted to store or resolve the null reference.
    #[error("null reference")]
    NullRef,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
