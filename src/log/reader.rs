//! Index-log Reader
//!
//! Reads records from the index log in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{OneTableError, Result};

use super::IndexRecord;

/// Sequential reader over the index log
///
/// Yields `(line_number, record)` pairs. Iteration stops after the first
/// error, since later records cannot be trusted once one is malformed.
pub struct IndexLogReader {
    reader: BufReader<File>,
    line: usize,
    buf: Vec<u8>,
    done: bool,
}

impl IndexLogReader {
    /// Open an index log for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            line: 0,
            buf: Vec::new(),
            done: false,
        })
    }

    /// Read the next record, or `None` at end of file
    pub fn next_record(&mut self) -> Result<Option<(usize, IndexRecord)>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }

        let text = std::str::from_utf8(&self.buf).map_err(|_| OneTableError::Corruption {
            line: self.line,
            reason: "record is not valid UTF-8".to_string(),
        })?;

        IndexRecord::parse(text, self.line).map(|record| Some((self.line, record)))
    }
}

impl Iterator for IndexLogReader {
    type Item = Result<(usize, IndexRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
