//! Log Writer
//!
//! Appends value bytes to the data log and records to the index log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::SyncStrategy;
use crate::error::{OneTableError, Result};

use super::IndexRecord;

/// Owns the append handles of both logs
///
/// Writes go straight to the file (no user-space buffer), so once an append
/// returns the bytes are visible to any other handle opened on the same file.
/// Durability beyond the page cache depends on the `SyncStrategy`.
///
/// A record that fails halfway is cut back off the index log, so the next
/// record never lands on the tail of a torn line. If that cut fails too, the
/// writer refuses every further record.
pub struct LogWriter {
    data: File,
    index: File,
    sync_strategy: SyncStrategy,
    unsynced: usize,

    /// Index-log length covered by complete records
    index_len: u64,

    /// Set when a torn record could not be removed
    torn: bool,
}

impl LogWriter {
    /// Open both logs for appending; the files must already exist
    pub fn open(data_path: &Path, index_path: &Path, sync_strategy: SyncStrategy) -> Result<Self> {
        let data = OpenOptions::new().append(true).open(data_path)?;
        let index = OpenOptions::new().append(true).open(index_path)?;
        let index_len = index.metadata()?.len();

        Ok(Self {
            data,
            index,
            sync_strategy,
            unsynced: 0,
            index_len,
            torn: false,
        })
    }

    /// Append raw value bytes to the data log
    pub fn append_value(&mut self, value: &[u8]) -> Result<()> {
        self.data.write_all(value)?;

        // The index record must never reach disk ahead of its bytes.
        if self.sync_strategy == SyncStrategy::EveryWrite {
            self.data.sync_data()?;
        }

        Ok(())
    }

    /// Append one record to the index log
    pub fn append_record(&mut self, record: &IndexRecord) -> Result<()> {
        if self.torn {
            return Err(OneTableError::Inconsistent(format!(
                "index log ends in a torn record past byte {}; refusing further writes",
                self.index_len
            )));
        }

        let line = record.encode();
        if let Err(e) = self.index.write_all(line.as_bytes()) {
            self.discard_partial();
            return Err(e.into());
        }
        self.index_len += line.len() as u64;
        self.unsynced += 1;

        match self.sync_strategy {
            SyncStrategy::EveryWrite => {
                self.index.sync_data()?;
                self.unsynced = 0;
            }
            SyncStrategy::EveryNEntries { count } => {
                if self.unsynced >= count {
                    self.sync()?;
                }
            }
            SyncStrategy::OsBuffered => {}
        }

        Ok(())
    }

    /// Force both logs to disk, data log first
    pub fn sync(&mut self) -> Result<()> {
        self.data.sync_data()?;
        self.index.sync_data()?;
        self.unsynced = 0;
        Ok(())
    }

    /// Records appended since the last sync
    pub fn unsynced(&self) -> usize {
        self.unsynced
    }

    /// Cut the index log back to its last complete record
    fn discard_partial(&mut self) {
        if let Err(e) = self.index.set_len(self.index_len) {
            tracing::error!(
                "Could not truncate torn index record at byte {}: {}",
                self.index_len,
                e
            );
            self.torn = true;
        }
    }
}
