//! Synchronous line-delimited JSON reader with iterator interface
//!
//! Provides a streaming iterator over load requests from a file, one JSON
//! object per line. Delegates format concerns to the json_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LoadRequest, LimitsError>` for each non-blank line:
//!
//! ```no_run
//! use load_limits_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Path::new("input.txt")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(request) => println!("Load {} for customer {}", request.id, request.customer_id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Opening a missing file returns `LimitsError::FileNotFound`
//! - Each malformed line is yielded as an `Err` carrying its 1-based line number
//! - Blank lines are skipped and still counted for line numbers
//! - A line longer than `MAX_LINE_LENGTH` bytes is an error; only that many
//!   bytes of it are buffered

use crate::io::json_format::{parse_line, MAX_LINE_LENGTH};
use crate::types::{LimitsError, LoadRequest};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use std::path::Path;
use std::str;

/// Iterator over the load requests of a line-delimited JSON source
#[derive(Debug)]
pub struct SyncReader<R = BufReader<File>> {
    reader: R,
    line_num: u64,
    buffer: Vec<u8>,
}

impl SyncReader<BufReader<File>> {
    /// Open a file for reading
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::FileNotFound` if the file does not exist and
    /// `LimitsError::IoError` for any other open failure.
    pub fn open(path: &Path) -> Result<Self, LimitsError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LimitsError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LimitsError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Ok(Self::new(BufReader::with_capacity(8 * 1024, file)))
    }
}

impl<R: BufRead> SyncReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_num: 0,
            buffer: Vec::with_capacity(256),
        }
    }

    /// Read one line into the buffer, at most `MAX_LINE_LENGTH` bytes of it
    ///
    /// Returns `Ok(false)` at end of input. An overlong line is consumed up to
    /// its terminator before the error is returned.
    fn read_bounded_line(&mut self) -> Result<bool, LimitsError> {
        self.buffer.clear();
        let limit = MAX_LINE_LENGTH as u64 + 2;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buffer)?;
        if read == 0 {
            return Ok(false);
        }

        if self.buffer.last() != Some(&b'\n') && read as u64 == limit {
            self.skip_rest_of_line()?;
            return Err(LimitsError::line_too_long(MAX_LINE_LENGTH));
        }

        let content = self.buffer.strip_suffix(b"\n").unwrap_or(&self.buffer[..]);
        let content = content.strip_suffix(b"\r").unwrap_or(content);
        if content.len() > MAX_LINE_LENGTH {
            return Err(LimitsError::line_too_long(MAX_LINE_LENGTH));
        }
        Ok(true)
    }

    fn skip_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let (used, done) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(end) => (end + 1, true),
                    None => (available.len(), false),
                }
            };
            self.reader.consume(used);
            if done {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<LoadRequest, LimitsError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_bounded_line() {
                Ok(false) => return None,
                Ok(true) => {
                    self.line_num += 1;
                    let line = match str::from_utf8(&self.buffer) {
                        Ok(line) => line.trim(),
                        Err(e) => {
                            let error = LimitsError::parse_error(self.line_num, e.to_string());
                            return Some(Err(error));
                        }
                    };
                    if line.is_empty() {
                        continue;
                    }
                    return Some(parse_line(line).map_err(|e| e.at_line(self.line_num)));
                }
                Err(e) => {
                    self.line_num += 1;
                    return Some(Err(e.at_line(self.line_num)));
                }
            }
        }
    }
}
