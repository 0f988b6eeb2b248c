use thiserror::Error;

/// Errors from head persistence operations.
#[derive(Debug, Error)]
pub enum HeadError {
    /// I/O failure in a durable backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted head bytes do not decode to a reference.
    #[error("corrupt head value: {0}")]
    Corrupt(String),

    /// Attempted to persist the null reference.
    #[error("refusing to persist the null reference")]
    NullRef,
}

/// Result alias for head persistence operations.
pub type HeadResult<T> = Result<T, HeadError>;
