//! TCP server.
//!
//! One listener, one task per accepted connection, and a single shared
//! [`PackageIndex`] behind all of them. The index is the only state the
//! connections share; a failing connection never affects another.

mod connection;

pub use connection::handle_connection;

use crate::error::Result;
use crate::index::PackageIndex;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// A bound package index server.
pub struct Server {
    listener: TcpListener,
    index: Arc<dyn PackageIndex>,
    max_line_length: usize,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("listener", &self.listener)
            .field("max_line_length", &self.max_line_length)
            .field("index", &"<dyn PackageIndex>")
            .finish()
    }
}

impl Server {
    /// Bind a listener on `addr`.
    ///
    /// Port 0 picks a free port; see [`local_addr`](Self::local_addr).
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the address cannot be bound.
    pub async fn bind(
        addr: SocketAddr,
        index: Arc<dyn PackageIndex>,
        max_line_length: usize,
    ) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            index,
            max_line_length,
        })
    }

    /// The address the listener is actually bound to.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the socket address cannot be queried.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever.
    ///
    /// # Errors
    ///
    /// Currently never returns an error; accept failures are logged and
    /// the loop carries on.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` resolves.
    ///
    /// Each connection is served on its own task. Connections still open at
    /// shutdown keep running until they finish or the runtime stops.
    ///
    /// # Errors
    ///
    /// Currently never returns an error; accept failures are logged and
    /// the loop carries on.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "Listening");
        }

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown requested, no longer accepting connections");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tokio::spawn(handle_connection(
                            stream,
                            peer,
                            Arc::clone(&self.index),
                            self.max_line_length,
                        ));
                    }
                    Err(e) => warn!(error = %e, "Failed to accept connection"),
                },
            }
        }
    }
}
