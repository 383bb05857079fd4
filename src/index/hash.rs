//! Hash index
//!
//! `HashMap`-backed index. Range queries scan every key and sort the
//! survivors, so they cost O(n + k log k); this is the variant's weak spot
//! compared to the tree.

use std::collections::HashMap;

use crate::error::{OneTableError, Result};

use super::{Index, Item, ValueMetadata};

/// Unordered index from key to value location
#[derive(Debug, Default)]
pub struct HashIndex {
    entries: HashMap<String, ValueMetadata>,
}

impl HashIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }
}

impl Index for HashIndex {
    fn get(&self, key: &str) -> Option<ValueMetadata> {
        self.entries.get(key).copied()
    }

    fn insert(&mut self, key: &str, value: ValueMetadata) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn between(&self, from: &str, to: &str) -> Result<Vec<Item>> {
        let mut keys: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|key| *key >= from && *key <= to)
            .collect();
        keys.sort_unstable();

        keys.into_iter()
            .map(|key| {
                let value = self.get(key).ok_or_else(|| {
                    OneTableError::Index(format!("found no value for key {}", key))
                })?;
                Ok(Item {
                    key: key.to_string(),
                    value,
                })
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
