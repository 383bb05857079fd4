//! # OneTable
//!
//! A single-table, log-structured key-value store with:
//! - An append-only data log holding raw value bytes
//! - An append-only index log recording where each key's value lives
//! - A pluggable in-memory index (hash table or binary search tree)
//! - Startup recovery by replaying the index log
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Front ends (CLI / REPL)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  get / insert / delete / between
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │            (RwLock: writers exclusive, readers shared)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Logs     │          │    Index    │
//!   │  data.ot    │─replay──▶│ Hash / Tree │
//!   │  index.ot   │          └─────────────┘
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use onetable::{Engine, IndexKind};
//!
//! # fn main() -> onetable::Result<()> {
//! let engine = Engine::open_path("./data".as_ref(), IndexKind::Tree.build())?;
//! engine.insert("apple", b"red")?;
//! assert_eq!(engine.get("apple")?, Some(b"red".to_vec()));
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod log;
pub mod memory;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OneTableError, Result};
pub use config::{Config, SyncStrategy};
pub use engine::{Engine, Status};
pub use index::{HashIndex, Index, IndexKind, Item, TreeIndex, ValueMetadata};
pub use memory::MemoryStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of OneTable
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
