//! Index Module
//!
//! In-memory lookup structure from key to value location in the data log.
//!
//! ## Responsibilities
//! - Point lookup, overwrite-on-insert, removal
//! - Inclusive, ascending range queries
//! - Rebuilt from the index log on every startup (it is a derived cache)
//!
//! ## Variants
//! - [`HashIndex`]: `HashMap` backed, O(1) point operations, range queries
//!   scan and sort every key
//! - [`TreeIndex`]: unbalanced binary search tree, O(h) point operations,
//!   range queries walk only the matching part of the tree
//!
//! Both variants must produce identical results for the same history of
//! operations.

mod hash;
mod tree;

use std::fmt;
use std::str::FromStr;

use crate::error::{OneTableError, Result};

pub use hash::HashIndex;
pub use tree::TreeIndex;

/// Location of a live value inside the data log
///
/// Tombstones never appear here: a deleted key has no metadata at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueMetadata {
    /// Byte offset of the first value byte
    pub offset: u64,

    /// Number of value bytes
    pub length: u64,
}

impl ValueMetadata {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// Offset one past the last value byte
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// A row produced by a range query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub value: ValueMetadata,
}

/// Capability shared by every in-memory index
///
/// `insert` and `delete` return `Result` so that an index backed by
/// something fallible can report failures; the in-memory variants never fail.
pub trait Index: Send + Sync {
    /// Look up the metadata for `key`
    fn get(&self, key: &str) -> Option<ValueMetadata>;

    /// Insert or overwrite the metadata for `key`
    fn insert(&mut self, key: &str, value: ValueMetadata) -> Result<()>;

    /// Remove `key`; removing an absent key is a no-op
    fn delete(&mut self, key: &str) -> Result<()>;

    /// All entries with `from <= key <= to`, ascending by key
    fn between(&self, from: &str, to: &str) -> Result<Vec<Item>>;

    /// Number of live keys
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selects an index implementation by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Hash,
    Tree,
}

impl IndexKind {
    /// Build an empty index of this kind
    pub fn build(self) -> Box<dyn Index> {
        match self {
            IndexKind::Hash => Box::new(HashIndex::new()),
            IndexKind::Tree => Box::new(TreeIndex::new()),
        }
    }
}

impl FromStr for IndexKind {
    type Err = OneTableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hash" | "hashtable" => Ok(IndexKind::Hash),
            "tree" | "bst" => Ok(IndexKind::Tree),
            other => Err(OneTableError::Config(format!(
                "unknown index kind '{}', expected one of: hash, tree",
                other
            ))),
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Hash => write!(f, "hash"),
            IndexKind::Tree => write!(f, "tree"),
        }
    }
}
