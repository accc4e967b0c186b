//! Response writing.

use crate::error::Result;
use crate::response::Response;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async writer for response lines.
///
/// Every [`send`](Self::send) flushes, so a client pipelining requests sees
/// each answer as soon as it is produced and in request order.
///
/// # Examples
///
/// ```
/// use depindex_wire::{Response, ResponseWriter};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> depindex_wire::Result<()> {
/// let mut writer = ResponseWriter::new(Vec::new());
/// writer.send(Response::Ok).await?;
/// writer.send(Response::Error).await?;
/// assert_eq!(writer.into_inner().into_inner(), b"OK\nERROR\n");
/// # Ok(())
/// # }
/// ```
pub struct ResponseWriter<W> {
    /// Buffered writer wrapping the underlying async writer.
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    /// Creates a new `ResponseWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Writes one response line and flushes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the peer has gone away or the
    /// underlying writer otherwise fails.
    pub async fn send(&mut self, response: Response) -> Result<()> {
        self.writer.write_all(response.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Returns a reference to the underlying buffered writer.
    #[must_use]
    pub fn get_ref(&self) -> &BufWriter<W> {
        &self.writer
    }

    /// Consumes the writer, returning the underlying buffered writer.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}
