use rootcast_types::HashRef;

/// Errors from record and chain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// Underlying content store failure.
    #[error("store error: {0}")]
    Store(#[from] rootcast_store::StoreError),

    /// A record's signature does not verify under the provider's key.
    #[error("bad signature on record {reference}")]
    BadSignature { reference: HashRef },

    /// A stored node's bytes do not hash to the reference that named them.
    #[error("reference mismatch: expected {expected}, computed {computed}")]
    RefMismatch {
        expected: HashRef,
        computed: HashRef,
    },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
