//! Per-connection request handling.

use crate::dispatch::respond;
use crate::index::PackageIndex;
use depindex_wire::{LineReader, Response, ResponseWriter};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

/// Serve one client until it disconnects.
///
/// Lines are answered strictly in arrival order, one response each. A
/// malformed line, including one that is not valid UTF-8, gets `ERROR` and
/// the session continues. The session ends at end of stream, on a read
/// failure (including an over-long line), or when a response cannot be sent.
#[tracing::instrument(name = "client", skip_all, fields(peer = %peer))]
pub async fn handle_connection<S>(
    stream: S,
    peer: SocketAddr,
    index: Arc<dyn PackageIndex>,
    max_line_length: usize,
) where
    S: AsyncRead + AsyncWrite,
{
    let (read_half, write_half) = tokio::io::split(stream);
    let mut reader = LineReader::with_max_line_length(read_half, max_line_length);
    let mut writer = ResponseWriter::new(write_half);

    info!("Client connected");

    loop {
        let response = match reader.next_line().await {
            Ok(Some(line)) => {
                debug!(line_number = reader.line_number(), request = %line, "Received");
                respond(index.as_ref(), &line).await
            }
            Ok(None) => break,
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "Malformed request line");
                Response::Error
            }
            Err(e) => {
                warn!(error = %e, "Connection error");
                break;
            }
        };

        if let Err(e) = writer.send(response).await {
            warn!(error = %e, "Failed to send response");
            break;
        }
    }

    info!(requests = reader.line_number(), "Client disconnected");
}
