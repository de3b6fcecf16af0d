//! Asynchronous line-delimited JSON reader with batch interface
//!
//! Provides batched reading of load requests from any tokio `AsyncRead`, for
//! the async processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - `tokio_util::codec::FramedRead` with a `LinesCodec` to split the input
//! - `futures::StreamExt` to pull lines from the framed stream
//! - the json_format module to convert each line
//!
//! ```text
//! AsyncRead → FramedRead<LinesCodec> → AsyncReader → batches of (seq, LoadRequest)
//!                                           ↓
//!                                  json_format::parse_line
//! ```
//!
//! Each request is tagged with its sequence number among non-blank lines so the
//! batch processor can restore input order after processing.

use crate::core::r#async::SequencedRequest;
use crate::io::json_format::{parse_line, MAX_LINE_LENGTH};
use crate::types::LimitsError;
use futures::stream::StreamExt;
use std::path::Path;
use tokio::io::AsyncRead;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

/// Batched reader over line-delimited JSON
pub struct AsyncReader<R: AsyncRead + Unpin> {
    lines: FramedRead<R, LinesCodec>,
    line_num: u64,
    next_seq: u64,
}

impl AsyncReader<tokio::fs::File> {
    /// Open a file for reading
    ///
    /// # Errors
    ///
    /// Returns `LimitsError::FileNotFound` if the file does not exist and
    /// `LimitsError::IoError` for any other open failure.
    pub async fn open(path: &Path) -> Result<Self, LimitsError> {
        let file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LimitsError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LimitsError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        Ok(Self::new(file))
    }
}

impl<R: AsyncRead + Unpin> AsyncReader<R> {
    /// Wrap any async reader
    ///
    /// Lines longer than `MAX_LINE_LENGTH` bytes are rejected without being
    /// buffered whole.
    pub fn new(reader: R) -> Self {
        Self {
            lines: FramedRead::new(
                reader,
                LinesCodec::new_with_max_length(MAX_LINE_LENGTH),
            ),
            line_num: 0,
            next_seq: 0,
        }
    }

    /// Read up to `batch_size` requests
    ///
    /// Blank lines are skipped. An empty batch means the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first malformed line as `LimitsError::ParseError` with its
    /// 1-based line number, or an I/O error from the underlying reader.
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Vec<SequencedRequest>, LimitsError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let line = match self.lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(codec_error(e).at_line(self.line_num + 1)),
                None => break,
            };
            self.line_num += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let request = parse_line(line).map_err(|e| e.at_line(self.line_num))?;
            batch.push((self.next_seq, request));
            self.next_seq += 1;
        }

        Ok(batch)
    }
}

fn codec_error(error: LinesCodecError) -> LimitsError {
    match error {
        LinesCodecError::MaxLineLengthExceeded => LimitsError::line_too_long(MAX_LINE_LENGTH),
        LinesCodecError::Io(e) => LimitsError::from(e),
    }
}
