//! The signed record model for rootcast.
//!
//! Each published update is one link in an append-only chain: a record
//! carrying the caller's payload, the provider's identity, and a reference
//! to the previous chain head, signed with the provider's key.
//!
//! Records are built in two stages: an unsigned [`RecordDraft`] is assembled
//! first, then [`RecordDraft::sign`] produces an immutable [`SignedRecord`].
//! There is no partially-signed state.
//!
//! [`walk_chain`] and [`verify_chain`] re-derive a full chain from its head
//! reference, which is what a remote aggregator does after syncing.

pub mod error;
pub mod record;
pub mod walk;

pub use error::{ChainError, ChainResult};
pub use record::{RecordDraft, SignedRecord};
pub use walk::{verify_chain, walk_chain};
