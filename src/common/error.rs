//! Error types for radioctl
//!
//! Error messages are written for operators driving a radio from the command
//! line, with hints on how to resolve common issues.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for radioctl
#[derive(Error, Debug)]
pub enum Error {
    // === Address Map Errors ===
    #[error("Address map '{path}' is malformed: {reason}")]
    AddressMapFormat { path: String, reason: String },

    #[error("No address mapping for parameter '{0}'. Check the name column of the address map CSV")]
    UnknownParameter(String),

    // === Transport Errors ===
    #[error("Connection failed: could not send command to the radio: {0}")]
    ConnectionFailed(#[source] io::Error),

    #[error("Short reply: expected {expected} bytes, peer closed after {got}")]
    ShortReply { expected: usize, got: usize },

    #[error("Reply was not valid UTF-8: {0}")]
    InvalidReply(#[from] std::str::Utf8Error),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create an address map format error for the given file
    pub fn map_format(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::AddressMapFormat {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
