//! Index-log record definitions
//!
//! One record per line: `key,offset,length`. A deleted key is written with
//! `offset = -1` and `length = -1`.

use crate::error::{OneTableError, Result};
use crate::index::ValueMetadata;

/// Offset and length written for a deleted key
const TOMBSTONE: i64 = -1;

/// Separates the three fields of a record
const FIELD_SEPARATOR: char = ',';

/// Terminates a record
const RECORD_SEPARATOR: char = '\n';

/// What a record says about its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The key's current value lives at this location
    Live(ValueMetadata),

    /// The key was deleted
    Tombstone,
}

/// A single line of the index log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub key: String,
    pub kind: RecordKind,
}

impl IndexRecord {
    pub fn live(key: impl Into<String>, value: ValueMetadata) -> Self {
        Self {
            key: key.into(),
            kind: RecordKind::Live(value),
        }
    }

    pub fn tombstone(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind: RecordKind::Tombstone,
        }
    }

    /// Render the record as one newline-terminated line
    pub fn encode(&self) -> String {
        let (offset, length) = match self.kind {
            RecordKind::Live(value) => (value.offset as i64, value.length as i64),
            RecordKind::Tombstone => (TOMBSTONE, TOMBSTONE),
        };
        format!(
            "{}{sep}{}{sep}{}{}",
            self.key,
            offset,
            length,
            RECORD_SEPARATOR,
            sep = FIELD_SEPARATOR
        )
    }

    /// Parse one line (without its terminator). `line` is the 1-based line
    /// number used in error messages.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let fields: Vec<&str> = text.split(FIELD_SEPARATOR).collect();
        if fields.len() != 3 {
            return Err(corruption(
                line,
                format!("expected 3 comma-separated fields, found {}", fields.len()),
            ));
        }

        let key = fields[0];
        let offset: i64 = fields[1]
            .parse()
            .map_err(|_| corruption(line, format!("offset '{}' is not an integer", fields[1])))?;
        let length: i64 = fields[2]
            .parse()
            .map_err(|_| corruption(line, format!("length '{}' is not an integer", fields[2])))?;

        // The length alone marks a tombstone; the offset is not inspected.
        if length == TOMBSTONE {
            return Ok(Self::tombstone(key));
        }

        let length = u64::try_from(length)
            .map_err(|_| corruption(line, format!("length {} is negative", length)))?;
        let offset = u64::try_from(offset)
            .map_err(|_| corruption(line, format!("offset {} is negative", offset)))?;

        Ok(Self::live(key, ValueMetadata::new(offset, length)))
    }
}

/// Reject keys containing a field or record separator
pub fn validate_key(key: &str) -> Result<()> {
    if key.contains(RECORD_SEPARATOR) || key.contains(FIELD_SEPARATOR) {
        return Err(OneTableError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn corruption(line: usize, reason: String) -> OneTableError {
    OneTableError::Corruption { line, reason }
}
