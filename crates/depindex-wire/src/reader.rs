//! Request line reading.
//!
//! This module provides async, buffered reading of newline-terminated request
//! lines with line number tracking for error reporting.

use crate::error::{Error, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::trace;

/// Default upper bound on the length of a single request line, in bytes.
///
/// The terminator is not counted.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Async reader for newline-terminated request lines.
///
/// `LineReader` wraps an async reader and yields one line at a time with the
/// terminator (`\n` or `\r\n`) removed. A final line without a terminator is
/// still returned before end of stream is reported.
///
/// # Type Parameters
///
/// * `R` - The underlying async reader type. Must implement [`AsyncRead`] and [`Unpin`].
///
/// # Examples
///
/// ```
/// use depindex_wire::LineReader;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> depindex_wire::Result<()> {
/// let mut reader = LineReader::new(&b"QUERY|a|\r\nINDEX|b|"[..]);
/// assert_eq!(reader.next_line().await?.as_deref(), Some("QUERY|a|"));
/// assert_eq!(reader.next_line().await?.as_deref(), Some("INDEX|b|"));
/// assert_eq!(reader.next_line().await?, None);
/// assert_eq!(reader.line_number(), 2);
/// # Ok(())
/// # }
/// ```
pub struct LineReader<R> {
    /// Buffered reader wrapping the underlying async reader.
    reader: BufReader<R>,
    /// Number of lines returned so far, which is also the 1-based number of the last one.
    line_number: usize,
    /// Longest accepted line, excluding the terminator.
    max_line_length: usize,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Creates a new `LineReader` with [`DEFAULT_MAX_LINE_LENGTH`].
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_max_line_length(reader, DEFAULT_MAX_LINE_LENGTH)
    }

    /// Creates a new `LineReader` that rejects lines longer than `max_line_length` bytes.
    #[must_use]
    pub fn with_max_line_length(reader: R, max_line_length: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            max_line_length,
            buf: Vec::new(),
        }
    }

    /// Returns the current line number.
    ///
    /// Returns 0 before any lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns the configured line length limit.
    #[must_use]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Reads the next line, without its terminator.
    ///
    /// Returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// - [`Error::LineTooLong`] if the line exceeds the configured limit
    /// - [`Error::InvalidUtf8`] if the line is not valid UTF-8
    /// - [`Error::Io`] if the underlying reader fails
    ///
    /// After [`Error::InvalidUtf8`] the line counts as read and the next call
    /// returns the following line. After any other error callers should stop
    /// reading.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();

        // Room for the longest accepted line plus "\r\n", and one more byte
        // so an over-long line is detectable.
        let budget = self.max_line_length.saturating_add(3) as u64;
        let read = (&mut self.reader)
            .take(budget)
            .read_until(b'\n', &mut self.buf)
            .await?;

        if read == 0 {
            return Ok(None);
        }

        let line_number = self.line_number + 1;

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        if self.buf.len() > self.max_line_length {
            return Err(Error::LineTooLong {
                line_number,
                limit: self.max_line_length,
            });
        }

        self.line_number = line_number;
        let line = String::from_utf8(std::mem::take(&mut self.buf))
            .map_err(|_| Error::InvalidUtf8 { line_number })?;

        trace!(line_number, len = line.len(), "Read line");
        Ok(Some(line))
    }

    /// Returns a reference to the underlying buffered reader.
    #[must_use]
    pub fn get_ref(&self) -> &BufReader<R> {
        &self.reader
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn new_reader_starts_at_line_zero() {
        let reader = LineReader::new(Cursor::new(b""));
        assert_eq!(reader.line_number(), 0);
        assert_eq!(reader.max_line_length(), DEFAULT_MAX_LINE_LENGTH);
    }

    #[tokio::test]
    async fn empty_input_is_end_of_stream() {
        let mut reader = LineReader::new(Cursor::new(b""));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn reads_lines_in_order() {
        let mut reader = LineReader::new(Cursor::new(b"INDEX|a|\nQUERY|a|\n"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("INDEX|a|"));
        assert_eq!(reader.line_number(), 1);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("QUERY|a|"));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn strips_carriage_return() {
        let mut reader = LineReader::new(Cursor::new(b"REMOVE|a|\r\n"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("REMOVE|a|"));
    }

    #[tokio::test]
    async fn returns_unterminated_final_line() {
        let mut reader = LineReader::new(Cursor::new(b"QUERY|a|"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("QUERY|a|"));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_line_is_returned_as_empty() {
        let mut reader = LineReader::new(Cursor::new(b"\nQUERY|a|\n"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("QUERY|a|"));
    }

    #[tokio::test]
    async fn accepts_line_at_limit() {
        let mut reader = LineReader::with_max_line_length(Cursor::new(b"12345\r\nok\n"), 5);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("12345"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn rejects_line_over_limit() {
        let mut reader = LineReader::with_max_line_length(Cursor::new(b"ok\n123456\n"), 5);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("ok"));
        let err = reader.next_line().await.unwrap_err();
        assert!(matches!(
            err,
            Error::LineTooLong {
                line_number: 2,
                limit: 5
            }
        ));
    }

    #[tokio::test]
    async fn rejects_unterminated_line_over_limit() {
        let mut reader = LineReader::with_max_line_length(Cursor::new(vec![b'a'; 64]), 8);
        assert!(matches!(
            reader.next_line().await,
            Err(Error::LineTooLong { .. })
        ));
    }

    #[tokio::test]
    async fn rejects_invalid_utf8() {
        let mut reader = LineReader::new(Cursor::new(b"QUERY|\xff|\n"));
        assert!(matches!(
            reader.next_line().await,
            Err(Error::InvalidUtf8 { line_number: 1 })
        ));
    }

    #[tokio::test]
    async fn continues_after_invalid_utf8() {
        let mut reader = LineReader::new(Cursor::new(b"QUERY|\xff|\nINDEX|a|\n"));
        assert!(reader.next_line().await.is_err());
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("INDEX|a|"));
        assert_eq!(reader.line_number(), 2);
        assert_eq!(reader.next_line().await.unwrap(), None);
    }
}
