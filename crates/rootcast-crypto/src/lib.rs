//! Cryptographic primitives for rootcast.
//!
//! Provides domain-separated BLAKE3 hashing, Ed25519 signing/verification,
//! and provider identity generation.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;
pub mod identity;
pub mod signer;

pub use hasher::ContentHasher;
pub use identity::{Identity, IdentityConfig, IdentityError};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
