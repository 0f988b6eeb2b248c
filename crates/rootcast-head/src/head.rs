use std::sync::Arc;

use tracing::debug;
use rootcast_types::HashRef;

use crate::error::{HeadError, HeadResult};
use crate::traits::KvStore;

/// The well-known key the chain head is persisted under.
pub const HEAD_KEY: &str = "/head/latest";

/// Persists the current chain-head reference under [`HEAD_KEY`].
///
/// The value format is the raw 32-byte encoding of the reference. Exactly
/// one head is live at a time; `save` replaces the previous value.
pub struct HeadStore {
    kv: Arc<dyn KvStore>,
    key: String,
}

impl HeadStore {
    /// Create a head store over the given backend, using [`HEAD_KEY`].
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_key(kv, HEAD_KEY)
    }

    /// Create a head store with a custom key (one chain per key).
    pub fn with_key(kv: Arc<dyn KvStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Load the persisted head reference.
    ///
    /// Returns `Ok(None)` if nothing was ever persisted, i.e. the chain is
    /// still at genesis.
    pub fn load(&self) -> HeadResult<Option<HashRef>> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            return Ok(None);
        };
        let reference =
            HashRef::from_slice(&bytes).map_err(|e| HeadError::Corrupt(e.to_string()))?;
        if reference.is_null() {
            return Err(HeadError::Corrupt("persisted head is null".into()));
        }
        Ok(Some(reference))
    }

    /// Persist a new head reference, replacing the previous one.
    pub fn save(&self, reference: &HashRef) -> HeadResult<()> {
        if reference.is_null() {
            return Err(HeadError::NullRef);
        }
        self.kv.put(&self.key, &reference.to_vec())?;
        debug!(head = %reference, "persisted chain head");
        Ok(())
    }
}

impl std::fmt::Debug for HeadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadStore").field("key", &self.key).finish()
    }
}
