use rootcast_types::HashRef;

use crate::error::StoreResult;
use crate::node::{NodeKind, StoredNode};

/// Content-addressed node store.
///
/// All implementations must satisfy these invariants:
/// - Nodes are immutable once written. Content-addressing guarantees this:
///   the same data always produces the same reference.
/// - Writes are idempotent; storing an existing node is a no-op.
/// - Concurrent reads are always safe (nodes are immutable).
/// - Loads check the node kind against the caller's expectation.
pub trait ContentStore: Send + Sync {
    /// Write a node and return its content-addressed reference.
    fn store(&self, node: &StoredNode) -> StoreResult<HashRef>;

    /// Load a node by reference, checking it has the expected kind.
    ///
    /// Returns `StoreError::NotFound` if the reference resolves to nothing
    /// and `StoreError::ShapeMismatch` if the stored node has a different
    /// kind than `expected`.
    fn load(&self, reference: &HashRef, expected: NodeKind) -> StoreResult<StoredNode>;

    /// Check whether a node exists in the store.
    fn contains(&self, reference: &HashRef) -> StoreResult<bool>;
}
