use std::collections::HashMap;
use std::sync::RwLock;

use rootcast_types::HashRef;

use crate::error::{StoreError, StoreResult};
use crate::node::{NodeKind, StoredNode};
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. All nodes are held in memory behind a
/// `RwLock` for safe concurrent access. Nodes are cloned on read/write.
pub struct InMemoryContentStore {
    nodes: RwLock<HashMap<HashRef, StoredNode>>,
}

impl InMemoryContentStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
        }
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.read().expect("lock poisoned").is_empty()
    }

    /// Remove all nodes from the store.
    pub fn clear(&self) {
        self.nodes.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn store(&self, node: &StoredNode) -> StoreResult<HashRef> {
        let reference = node.compute_ref();
        if reference.is_null() {
            return Err(StoreError::NullRef);
        }
        let mut map = self.nodes.write().expect("lock poisoned");
        // Idempotent: if already present, skip (content-addressing guarantees
        // the same reference always maps to the same node).
        map.entry(reference).or_insert_with(|| node.clone());
        Ok(reference)
    }

    fn load(&self, reference: &HashRef, expected: NodeKind) -> StoreResult<StoredNode> {
        if reference.is_null() {
            return Err(StoreError::NullRef);
        }
        let map = self.nodes.read().expect("lock poisoned");
        let node = map
            .get(reference)
            .cloned()
            .ok_or(StoreError::NotFound(*reference))?;
        if node.kind != expected {
            return Err(StoreError::ShapeMismatch {
                reference: *reference,
                expected,
                actual: node.kind,
            });
        }
        Ok(node)
    }

    fn contains(&self, reference: &HashRef) -> StoreResult<bool> {
        let map = self.nodes.read().expect("lock poisoned");
        Ok(map.contains_key(reference))
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("node_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Payload;

    fn payload_node(content: &[u8]) -> StoredNode {
        Payload::new(content.to_vec()).to_node().unwrap()
    }

    #[test]
    fn store_and_load() {
        let store = InMemoryContentStore::new();
        let node = payload_node(b"dc-eu-west");
        let reference = store.store(&node).unwrap();
        let loaded = store.load(&reference, NodeKind::Payload).unwrap();
        assert_eq!(loaded, node);
    }

    #[test]
    fn store_is_idempotent() {
        let store = InMemoryContentStore::new();
        let node = payload_node(b"dup");
        let r1 = store.store(&node).unwrap();
        let r2 = store.store(&node).unwrap();
        assert_eq!(r1, r2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_missing_is_not_found() {
        let store = InMemoryContentStore::new();
        let missing = HashRef::from_hash([9u8; 32]);
        assert!(matches!(
            store.load(&missing, NodeKind::Payload).unwrap_err(),
            StoreError::NotFound(r) if r == missing
        ));
    }

    #[test]
    fn load_checks_shape() {
        let store = InMemoryContentStore::new();
        let node = StoredNode::new(NodeKind::Record, b"a record".to_vec());
        let reference = store.store(&node).unwrap();
        let err = store.load(&reference, NodeKind::Payload).unwrap_err();
        assert!(matches!(err, StoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn load_null_ref_is_rejected() {
        let store = InMemoryContentStore::new();
        assert!(matches!(
            store.load(&HashRef::null(), NodeKind::Payload).unwrap_err(),
            StoreError::NullRef
        ));
    }

    #[test]
    fn contains_tracks_storage() {
        let store = InMemoryContentStore::new();
        let node = payload_node(b"x");
        let reference = node.compute_ref();
        assert!(!store.contains(&reference).unwrap());
        store.store(&node).unwrap();
        assert!(store.contains(&reference).unwrap());
    }
}
