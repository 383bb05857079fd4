//! In-memory store
//!
//! A `HashMap` with the same get/insert/delete shape as the engine and no
//! persistence. Used only as a baseline when benchmarking the engine.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Unordered, non-durable key-value map
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &[u8]) {
        self.data.write().insert(key.to_string(), value.to_vec());
    }

    pub fn delete(&self, key: &str) {
        self.data.write().remove(key);
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
