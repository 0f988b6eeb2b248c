use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::HeadResult;
use crate::traits::KvStore;

/// In-memory key/value store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryKvStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.read().expect("lock poisoned").is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> HeadResult<Option<Vec<u8>>> {
        let values = self.values.read().expect("lock poisoned");
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> HeadResult<()> {
        let mut values = self.values.write().expect("lock poisoned");
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
