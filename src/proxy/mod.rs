//! Outbound command path to the radio control endpoint
//!
//! One short-lived TCP connection per command, carrying a plain-text message
//! and expecting a fixed four-byte text reply.

pub mod client;
pub mod protocol;

pub use client::CommandProxy;
pub use protocol::{Command, CommandKind, REPLY_LEN};
