//! Foundation types for rootcast.
//!
//! This crate provides the identity and reference primitives used throughout
//! the rootcast system. Every other rootcast crate depends on it.
//!
//! # Key Types
//!
//! - [`HashRef`] — Content-addressed reference to a stored node (BLAKE3 hash)
//! - [`PeerId`] — Stable peer identity derived from an Ed25519 public key

pub mod error;
pub mod peer;
pub mod reference;

pub use error::TypeError;
pub use peer::PeerId;
pub use reference::HashRef;
