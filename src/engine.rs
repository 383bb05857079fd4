//! Engine Module
//!
//! The table: two append-only logs plus an in-memory index.
//!
//! ## Responsibilities
//! - Replay the index log into the chosen index on startup
//! - Append values and index records in crash-safe order
//! - Serve point lookups and range queries from the index
//! - Serialize writers against each other and against readers

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;

use crate::config::Config;
use crate::error::{OneTableError, Result};
use crate::index::{Index, Item, ValueMetadata};
use crate::log::{self, validate_key, IndexRecord, LogWriter, Recovery};

/// The main storage engine
///
/// ## Concurrency Model: Reader-Writer Lock
///
/// - **Writes** (insert/delete): hold the write lock for the whole
///   data append → index append → index update → offset advance sequence
///
/// - **Reads** (get/between): hold the read lock while consulting the index.
///   `get` copies the metadata and releases the lock before reading the data
///   log; the bytes it points at were appended before the metadata was
///   published and are never rewritten.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Path of the data log
    data_path: PathBuf,

    /// Path of the index log
    index_path: PathBuf,

    /// Index, log handles and write offset behind one lock
    state: RwLock<State>,
}

struct State {
    /// In-memory index rebuilt from the index log
    index: Box<dyn Index>,

    /// Append handles for both logs
    writer: LogWriter,

    /// Next write position in the data log (always equals its size)
    offset: u64,

    /// Records in the index log
    index_records: u64,
}

/// Point-in-time summary of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Live keys in the index
    pub keys: u64,

    /// Size of the data log, live values and garbage alike
    pub data_log_bytes: u64,

    /// Size of the index log
    pub index_log_bytes: u64,

    /// Records in the index log (inserts plus tombstones)
    pub index_records: u64,
}

impl Engine {
    /// Open or create a table with the given config and an empty index
    ///
    /// On startup:
    /// 1. Reject an index that already holds keys, then create the data
    ///    directory if needed
    /// 2. Create both logs, or replay the existing index log into `index`
    /// 3. Resume writing at the end of the data log
    pub fn open(config: Config, mut index: Box<dyn Index>) -> Result<Self> {
        config.validate()?;

        // The index log is the only source of truth for the index.
        if !index.is_empty() {
            return Err(OneTableError::Config(format!(
                "index must be empty before recovery, found {} keys",
                index.len()
            )));
        }

        fs::create_dir_all(&config.data_dir)?;

        let data_path = log::data_path(&config.data_dir);
        let index_path = log::index_path(&config.data_dir);

        let recovery = Recovery::recover(&config.data_dir, index.as_mut())?;

        tracing::info!(
            "Recovered {}: {} records replayed ({} inserts, {} tombstones), {} live keys",
            config.data_dir.display(),
            recovery.records_replayed,
            recovery.inserts,
            recovery.tombstones,
            index.len()
        );

        let offset = fs::metadata(&data_path)?.len();
        let writer = LogWriter::open(&data_path, &index_path, config.sync_strategy)?;

        tracing::info!("Data log is {} bytes, next write at offset {}", offset, offset);

        Ok(Self {
            config,
            data_path,
            index_path,
            state: RwLock::new(State {
                index,
                writer,
                offset,
                index_records: recovery.records_replayed,
            }),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path, index: Box<dyn Index>) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config, index)
    }

    /// Get a value by key
    ///
    /// Returns `Ok(None)` if the key was never inserted or has been deleted.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = match self.state.read().index.get(key) {
            Some(value) => value,
            None => {
                tracing::trace!("get {:?}: not found", key);
                return Ok(None);
            }
        };

        tracing::trace!("get {:?}: offset={} length={}", key, value.offset, value.length);

        let mut file = File::open(&self.data_path)?;
        read_value(&mut file, value).map(Some)
    }

    /// Insert or overwrite a key
    ///
    /// Steps:
    /// 1. Validate the key (no I/O on failure)
    /// 2. Append the value to the data log
    /// 3. Append the index record
    /// 4. Update the index
    /// 5. Advance the write offset
    pub fn insert(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;

        let mut state = self.state.write();

        let metadata = ValueMetadata::new(state.offset, value.len() as u64);

        if let Err(e) = state.writer.append_value(value) {
            // A partial write may still have extended the data log.
            if let Ok(data) = fs::metadata(&self.data_path) {
                state.offset = data.len();
            }
            return Err(e);
        }

        if let Err(e) = state.writer.append_record(&IndexRecord::live(key, metadata)) {
            tracing::warn!(
                "Index record for {:?} failed after its value was appended; {} bytes at offset {} are orphaned: {}",
                key,
                metadata.length,
                metadata.offset,
                e
            );
            state.offset = metadata.end();
            return Err(e);
        }

        state.index.insert(key, metadata)?;
        state.offset = metadata.end();
        state.index_records += 1;

        tracing::debug!("insert {:?}: offset={} length={}", key, metadata.offset, metadata.length);

        Ok(())
    }

    /// Delete a key
    ///
    /// Appends a tombstone and removes the key from the index. Deleting an
    /// absent key succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        // Such a key can never have been inserted, and its tombstone would
        // not parse on the next startup.
        if validate_key(key).is_err() {
            return Ok(());
        }

        let mut state = self.state.write();

        state.writer.append_record(&IndexRecord::tombstone(key))?;
        state.index.delete(key)?;
        state.index_records += 1;

        tracing::debug!("delete {:?}", key);

        Ok(())
    }

    /// Keys in `from..=to` with their value locations, ascending
    pub fn between(&self, from: &str, to: &str) -> Result<Vec<Item>> {
        tracing::trace!("between {:?} and {:?}", from, to);
        self.state.read().index.between(from, to)
    }

    /// Keys in `from..=to` with their values, ascending
    pub fn scan(&self, from: &str, to: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let items = self.between(from, to)?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.data_path)?;
        items
            .into_iter()
            .map(|item| Ok((item.key, read_value(&mut file, item.value)?)))
            .collect()
    }

    /// Summarize the table
    pub fn status(&self) -> Result<Status> {
        let state = self.state.read();
        let index_log_bytes = fs::metadata(&self.index_path)?.len();

        Ok(Status {
            keys: state.index.len() as u64,
            data_log_bytes: state.offset,
            index_log_bytes,
            index_records: state.index_records,
        })
    }

    /// Force both logs to disk
    pub fn sync(&self) -> Result<()> {
        self.state.write().writer.sync()
    }

    /// Close the engine gracefully
    ///
    /// Syncs both logs so nothing is left in the page cache
    pub fn close(self) -> Result<()> {
        self.sync()?;
        tracing::info!("Closed {}", self.config.data_dir.display());
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the data log path
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Get the index log path
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Position the next value will be written at
    pub fn offset(&self) -> u64 {
        self.state.read().offset
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.state.read().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Read exactly the bytes described by `value`
fn read_value(file: &mut File, value: ValueMetadata) -> Result<Vec<u8>> {
    file.seek(SeekFrom::Start(value.offset))?;
    let mut buf = vec![0u8; value.length as usize];
    file.read_exact(&mut buf)?;
    Ok(buf)
}
