//! Command proxy executing parameter commands over TCP
//!
//! Every command opens a fresh connection to the radio control endpoint,
//! writes the message, reads the fixed-size reply and closes. Connections are
//! never pooled or reused. There is no timeout on the path; a hung radio
//! blocks the caller until the transport gives up on its own.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::common::{Error, Result};
use crate::map::AddressMap;

use super::protocol::{Command, CommandKind, REPLY_LEN};

/// Client for the radio control endpoint
pub struct CommandProxy {
    host: String,
    port: u16,
    map: AddressMap,
    /// Serializes commands so concurrent callers on one proxy cannot
    /// interleave their connections at the endpoint
    flight: Mutex<()>,
}

impl CommandProxy {
    /// Create a proxy for the endpoint at `host:port` using the given map
    pub fn new(host: impl Into<String>, port: u16, map: AddressMap) -> Self {
        Self {
            host: host.into(),
            port,
            map,
            flight: Mutex::new(()),
        }
    }

    /// The address map this proxy resolves names against
    pub fn map(&self) -> &AddressMap {
        &self.map
    }

    /// Execute a command against the endpoint and return the reply text.
    ///
    /// The logical `name` is resolved against the address map before any
    /// network I/O happens; an unknown name fails without touching the
    /// socket. Every failure is terminal for this call, the caller is the
    /// only retry authority.
    pub async fn send(
        &self,
        kind: CommandKind,
        name: &str,
        value: Option<&str>,
    ) -> Result<String> {
        let address = self.map.resolve(name)?;
        let command = Command {
            kind,
            address,
            value: value.map(str::to_string),
        };
        let message = command.to_wire();

        let _flight = self.flight.lock().await;

        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(Error::ConnectionFailed)?;

        stream
            .write_all(message.as_bytes())
            .await
            .map_err(Error::ConnectionFailed)?;
        tracing::debug!(%message, "sent command");

        let mut reply = [0u8; REPLY_LEN];
        read_reply(&mut stream, &mut reply).await?;

        let text = std::str::from_utf8(&reply)?.to_string();
        tracing::debug!(reply = %text, "received reply");
        Ok(text)
    }

    // Fixed logical names the orchestration layer drives. Each is a plain
    // set command; the CSV map decides which component they land on.

    /// Set the carrier frequency in hertz
    pub async fn set_frequency(&self, hz: u64) -> Result<String> {
        self.send(CommandKind::Set, "frequency", Some(&hz.to_string()))
            .await
    }

    /// Set the sample rate in samples per second
    pub async fn set_rate(&self, sps: u64) -> Result<String> {
        self.send(CommandKind::Set, "rate", Some(&sps.to_string()))
            .await
    }

    /// Set the gain in dB
    pub async fn set_gain(&self, db: f64) -> Result<String> {
        self.send(CommandKind::Set, "gain", Some(&db.to_string()))
            .await
    }

    /// Set the bandwidth in hertz
    pub async fn set_bandwidth(&self, hz: u64) -> Result<String> {
        self.send(CommandKind::Set, "bandwidth", Some(&hz.to_string()))
            .await
    }
}

/// Read exactly `buf.len()` reply bytes, failing with `ShortReply` if the
/// peer closes first
async fn read_reply(stream: &mut TcpStream, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = stream
            .read(&mut buf[filled..])
            .await
            .map_err(Error::ConnectionFailed)?;
        if n == 0 {
            return Err(Error::ShortReply {
                expected: buf.len(),
                got: filled,
            });
        }
        filled += n;
    }
    Ok(())
}
