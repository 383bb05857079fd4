//! Recovery
//!
//! Rebuilds an in-memory index by replaying the index log at startup.

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::error::{OneTableError, Result};
use crate::index::{HashIndex, Index};

use super::{data_path, index_path, IndexLogReader, RecordKind};

/// Handles startup recovery of a table directory
pub struct Recovery;

/// Result of a recovery operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of index-log records applied
    pub records_replayed: u64,

    /// Records that inserted or overwrote a key
    pub inserts: u64,

    /// Records that deleted a key
    pub tombstones: u64,

    /// Size of the data log when recovery ran
    pub data_log_size: u64,

    /// Highest data-log position referenced by any record
    pub referenced_bytes: u64,

    /// Whether this recovery created a missing log
    pub created: bool,
}

impl RecoveryResult {
    /// Data-log bytes past the last referenced position (left by a write
    /// that failed before its index record was appended)
    pub fn orphaned_tail(&self) -> u64 {
        self.data_log_size.saturating_sub(self.referenced_bytes)
    }
}

impl Recovery {
    /// Prepare `dir` and replay its index log into `index`
    ///
    /// This will:
    /// 1. Create both logs if neither exists
    /// 2. Refuse to start if the data log exists without its index log
    /// 3. Replay every index-log record in file order
    pub fn recover(dir: &Path, index: &mut dyn Index) -> Result<RecoveryResult> {
        let data_path = data_path(dir);
        let index_path = index_path(dir);

        let created = Self::prepare(&data_path, &index_path)?;
        let data_log_size = fs::metadata(&data_path)?.len();

        let mut result = Self::replay(&index_path, data_log_size, index)?;
        result.created = created;

        if result.orphaned_tail() > 0 {
            tracing::warn!(
                "Data log has {} unreferenced trailing bytes (interrupted write)",
                result.orphaned_tail()
            );
        }

        Ok(result)
    }

    /// Replay an index log into `index`
    ///
    /// Later records for a key supersede earlier ones; a tombstone removes the
    /// key. Every live record must point inside the first `data_log_size`
    /// bytes of the data log.
    pub fn replay(index_path: &Path, data_log_size: u64, index: &mut dyn Index) -> Result<RecoveryResult> {
        let mut result = RecoveryResult {
            data_log_size,
            ..RecoveryResult::default()
        };

        for entry in IndexLogReader::open(index_path)? {
            let (line, record) = entry?;

            match record.kind {
                RecordKind::Live(value) => {
                    if value.end() > data_log_size {
                        return Err(OneTableError::Inconsistent(format!(
                            "record at line {} references bytes {}..{} but the data log holds {} bytes",
                            line,
                            value.offset,
                            value.end(),
                            data_log_size
                        )));
                    }
                    index.insert(&record.key, value)?;
                    result.inserts += 1;
                    result.referenced_bytes = result.referenced_bytes.max(value.end());
                }
                RecordKind::Tombstone => {
                    index.delete(&record.key)?;
                    result.tombstones += 1;
                }
            }

            result.records_replayed += 1;
        }

        Ok(result)
    }

    /// Check a table directory without modifying it
    ///
    /// Replays into a scratch index and reports what a real startup would see.
    pub fn verify(dir: &Path) -> Result<RecoveryResult> {
        let data_path = data_path(dir);
        let index_path = index_path(dir);

        if !data_path.exists() {
            return Err(OneTableError::Inconsistent(format!(
                "data log {} does not exist",
                data_path.display()
            )));
        }
        if !index_path.exists() {
            return Err(missing_index(&data_path, &index_path));
        }

        let data_log_size = fs::metadata(&data_path)?.len();
        let mut scratch = HashIndex::new();
        Self::replay(&index_path, data_log_size, &mut scratch)
    }

    /// Make sure both logs exist; returns true if they were created
    fn prepare(data_path: &Path, index_path: &Path) -> Result<bool> {
        match (data_path.exists(), index_path.exists()) {
            (true, true) => Ok(false),
            (true, false) => Err(missing_index(data_path, index_path)),
            (false, true) => {
                // An index log with records but no data log points at nothing.
                if fs::metadata(index_path)?.len() > 0 {
                    return Err(OneTableError::Inconsistent(format!(
                        "index log {} has records but data log {} is missing",
                        index_path.display(),
                        data_path.display()
                    )));
                }
                OpenOptions::new().write(true).create_new(true).open(data_path)?;
                Ok(true)
            }
            (false, false) => {
                OpenOptions::new().write(true).create_new(true).open(data_path)?;
                OpenOptions::new().write(true).create_new(true).open(index_path)?;
                Ok(true)
            }
        }
    }
}

fn missing_index(data_path: &Path, index_path: &Path) -> OneTableError {
    OneTableError::Inconsistent(format!(
        "index log {} does not exist for data log {}",
        index_path.display(),
        data_path.display()
    ))
}
