use serde::{Deserialize, Serialize};
use rootcast_crypto::ContentHasher;
use rootcast_types::HashRef;

use crate::error::{StoreError, StoreResult};

/// The kind of node stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Caller-supplied payload (e.g. a location descriptor).
    Payload,
    /// A signed chain record.
    Record,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Payload => write!(f, "payload"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// A stored node: kind tag + serialized data.
///
/// `StoredNode` is the unit of storage. The store never interprets the data
/// beyond the kind tag — it is a pure key-value store keyed by content hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNode {
    /// The type of this node.
    pub kind: NodeKind,
    /// The serialized bytes of the node.
    pub data: Vec<u8>,
}

impl StoredNode {
    /// Create a new stored node from kind and data.
    pub fn new(kind: NodeKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// Compute the content-addressed reference for this node.
    ///
    /// Uses the domain-separated hasher for the node kind, so a payload and
    /// a record with identical bytes get distinct references.
    pub fn compute_ref(&self) -> HashRef {
        let hasher = match self.kind {
            NodeKind::Payload => &ContentHasher::PAYLOAD,
            NodeKind::Record => &ContentHasher::RECORD,
        };
        hasher.hash(&self.data)
    }
}

/// Opaque caller-supplied payload.
///
/// The publisher treats payload contents as an opaque byte string; only the
/// caller and the remote aggregator interpret them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub data: Vec<u8>,
}

impl Payload {
    /// Create a new payload from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// Serialize into a stored node of kind [`NodeKind::Payload`].
    pub fn to_node(&self) -> StoreResult<StoredNode> {
        let data =
            bincode::serialize(self).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(StoredNode::new(NodeKind::Payload, data))
    }

    /// Decode from a stored node, checking the kind tag.
    pub fn from_node(node: &StoredNode) -> StoreResult<Self> {
        if node.kind != NodeKind::Payload {
            return Err(StoreError::ShapeMismatch {
                reference: node.compute_ref(),
                expected: NodeKind::Payload,
                actual: node.kind,
            });
        }
        bincode::deserialize(&node.data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
