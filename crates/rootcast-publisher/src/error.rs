use thiserror::Error;

/// Errors from the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transport has been closed; no further announcements are possible.
    #[error("transport is closed")]
    Closed,

    /// A root announcement was not accepted.
    #[error("announce failed: {0}")]
    Announce(String),

    /// Dialing the aggregator peer failed.
    #[error("connect failed: {0}")]
    Connect(String),
}

/// Errors from the publishing orchestrator.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Construction-time failure: aggregator connectivity or publisher setup.
    /// The orchestrator is not usable.
    #[error("bootstrap failed: {0}")]
    Bootstrap(TransportError),

    /// The transport rejected an operation.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Content store failure.
    #[error("store error: {0}")]
    Store(#[from] rootcast_store::StoreError),

    /// Record construction or decoding failure.
    #[error("chain error: {0}")]
    Chain(#[from] rootcast_chain::ChainError),

    /// Head persistence failure.
    #[error("head store error: {0}")]
    Head(#[from] rootcast_head::HeadError),

    /// The orchestrator has been shut down and accepts no further work.
    #[error("publisher is shut down")]
    ShutDown,
}
