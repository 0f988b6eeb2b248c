//! Content-addressed node storage for rootcast.
//!
//! Every structured value the publisher touches -- caller payloads and signed
//! chain records -- is stored as an immutable node identified by its BLAKE3
//! hash (domain-separated by node kind). The publisher itself never owns
//! node storage; it talks to any backend through the [`ContentStore`] trait.
//!
//! # Design Rules
//!
//! 1. Nodes are immutable once written (content-addressing guarantees this).
//! 2. Writes are idempotent: storing the same node twice returns the same
//!    reference.
//! 3. Loads are shape-checked: a caller asking for a payload node and
//!    receiving a record node gets a shape-mismatch error, not silent bytes.
//! 4. The store never interprets node contents beyond the kind tag.

pub mod error;
pub mod memory;
pub mod node;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryContentStore;
pub use node::{NodeKind, Payload, StoredNode};
pub use traits::ContentStore;
