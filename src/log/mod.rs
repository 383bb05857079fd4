//! Log Module
//!
//! The two append-only files that make a table durable.
//!
//! ## Responsibilities
//! - Append value bytes to the data log
//! - Append one index record per insert and per delete
//! - Replay the index log into an in-memory index at startup
//!
//! ## File Layout
//! ```text
//! {data_dir}/
//! ├── data.ot     raw value bytes, back to back, never rewritten
//! └── index.ot    text records, one per line
//!
//! index.ot:
//! ┌─────────────────────────────┐
//! │ apple,0,5                   │  live: value at bytes 0..5
//! │ pear,5,4                    │  live: value at bytes 5..9
//! │ apple,9,6                   │  overwrite: bytes 0..5 are now garbage
//! │ pear,-1,-1                  │  tombstone
//! └─────────────────────────────┘
//! ```
//!
//! The data log is written before the index record that references it, so
//! the index log never points at bytes that were not appended first. Nothing
//! is ever reclaimed: the data log grows without bound.

mod record;
mod reader;
mod writer;
mod recovery;

use std::path::{Path, PathBuf};

pub use record::{validate_key, IndexRecord, RecordKind};
pub use reader::IndexLogReader;
pub use writer::LogWriter;
pub use recovery::{Recovery, RecoveryResult};

/// File name of the data log
pub const DATA_FILENAME: &str = "data.ot";

/// File name of the index log
pub const INDEX_FILENAME: &str = "index.ot";

/// Path of the data log inside a table directory
pub fn data_path(dir: &Path) -> PathBuf {
    dir.join(DATA_FILENAME)
}

/// Path of the index log inside a table directory
pub fn index_path(dir: &Path) -> PathBuf {
    dir.join(INDEX_FILENAME)
}
