//! Passive event listener
//!
//! Accepts inbound connections from the radio process and classifies the
//! first byte of each received chunk: `'1'` counts one transmitted frame,
//! `'2'` one received frame, anything else is ignored. The counters are
//! best-effort observability with no ordering guarantee relative to the
//! command path.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::common::Result;

/// Marker byte for a transmitted frame
const TX_MARKER: u8 = b'1';
/// Marker byte for a received frame
const RX_MARKER: u8 = b'2';

/// Monotonically increasing event counters shared with the monitor worker
#[derive(Debug, Default)]
pub struct EventCounters {
    tx: AtomicU64,
    rx: AtomicU64,
}

impl EventCounters {
    /// Transmitted-frame markers seen so far
    pub fn tx_count(&self) -> u64 {
        self.tx.load(Ordering::Relaxed)
    }

    /// Received-frame markers seen so far
    pub fn rx_count(&self) -> u64 {
        self.rx.load(Ordering::Relaxed)
    }

    /// Classify the first byte of a received chunk
    fn record(&self, chunk: &[u8]) {
        match chunk.first() {
            Some(&TX_MARKER) => {
                self.tx.fetch_add(1, Ordering::Relaxed);
            }
            Some(&RX_MARKER) => {
                self.rx.fetch_add(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }
}

/// Background listener counting radio event markers
///
/// One worker task accepts connections; each connection gets a read loop that
/// shares the counters. All of them observe the same shutdown signal, so
/// `shutdown` stops accepting, closes every open connection and joins the
/// worker.
pub struct EventMonitor {
    counters: Arc<EventCounters>,
    shutdown: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl EventMonitor {
    /// Bind the listener and spawn the accept loop.
    ///
    /// Port 0 picks an ephemeral port; `local_addr` reports what was bound.
    pub async fn bind(host: &str, port: u16, receive_buffer: usize) -> Result<Self> {
        let listener = TcpListener::bind((host, port)).await?;
        let local_addr = listener.local_addr()?;
        let counters = Arc::new(EventCounters::default());
        let (shutdown, shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(accept_loop(
            listener,
            Arc::clone(&counters),
            shutdown_rx,
            receive_buffer,
        ));
        tracing::info!(%local_addr, "event monitor listening");

        Ok(Self {
            counters,
            shutdown,
            worker: Some(worker),
            local_addr,
        })
    }

    /// Shared handle to the counters
    pub fn counters(&self) -> Arc<EventCounters> {
        Arc::clone(&self.counters)
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signal the worker to stop and wait for it to finish
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

impl Drop for EventMonitor {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

async fn accept_loop(
    listener: TcpListener,
    counters: Arc<EventCounters>,
    mut shutdown: watch::Receiver<bool>,
    receive_buffer: usize,
) {
    let mut connections = Vec::new();

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                // A dropped sender counts as shutdown
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer)) => {
                        tracing::debug!(%peer, "event connection accepted");
                        connections.push(tokio::spawn(read_events(
                            stream,
                            Arc::clone(&counters),
                            shutdown.clone(),
                            receive_buffer,
                        )));
                    }
                    Err(e) => {
                        tracing::warn!("accept error: {e}");
                    }
                }
            }
        }
    }

    // Connection tasks see the same shutdown signal; wait for them so every
    // socket is closed before the worker returns.
    for connection in connections {
        let _ = connection.await;
    }
    tracing::info!(
        tx = counters.tx_count(),
        rx = counters.rx_count(),
        "event monitor stopped"
    );
}

async fn read_events(
    mut stream: TcpStream,
    counters: Arc<EventCounters>,
    mut shutdown: watch::Receiver<bool>,
    receive_buffer: usize,
) {
    let mut buf = vec![0u8; receive_buffer];

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            read = stream.read(&mut buf) => {
                match read {
                    Ok(0) => break,
                    Ok(n) => {
                        counters.record(&buf[..n]);
                        tracing::debug!(chunk = n, "event chunk");
                    }
                    Err(e) => {
                        // Disconnection and malformed frames are not
                        // distinguished; the connection is just dropped.
                        tracing::debug!("event connection closed: {e}");
                        break;
                    }
                }
            }
        }
    }
}
