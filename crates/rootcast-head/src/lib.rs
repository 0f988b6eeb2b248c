//! Durable chain-head persistence for rootcast.
//!
//! The publisher records the reference of the most recently published chain
//! record under a single well-known key so that a restart resumes the chain
//! instead of forking a new one. Persistence goes through the byte-oriented
//! [`KvStore`] trait; [`HeadStore`] layers the fixed key and the raw
//! `HashRef` encoding on top of whatever backend the host supplies.
//!
//! # Backends
//!
//! - [`InMemoryKvStore`] — `HashMap`-based store for tests
//! - [`FsKvStore`] — file-per-key store with atomic replace

pub mod error;
pub mod fs;
pub mod head;
pub mod memory;
pub mod traits;

pub use error::{HeadError, HeadResult};
pub use fs::FsKvStore;
pub use head::{HeadStore, HEAD_KEY};
pub use memory::InMemoryKvStore;
pub use traits::KvStore;
