//! Wire format for radio parameter commands
//!
//! Commands are plain text: `<kind>:<engine>.<component>.<parameter>`, with
//! `=<value>` appended for set commands. The delimiters are not escaped, so
//! engine, component, parameter and value must not contain `:`, `.` or `=`.
//! Replies are a fixed four bytes of text with no further framing.

use std::fmt;

use crate::map::ParameterAddress;

/// Fixed reply length in bytes
pub const REPLY_LEN: usize = 4;

/// Whether a command writes or reads the addressed parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Set,
    Get,
}

impl CommandKind {
    /// Lowercase wire spelling of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Get => "get",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter command bound for the control endpoint
#[derive(Debug, Clone)]
pub struct Command<'a> {
    pub kind: CommandKind,
    pub address: &'a ParameterAddress,
    pub value: Option<String>,
}

impl<'a> Command<'a> {
    /// A set command writing `value` to the addressed parameter
    pub fn set(address: &'a ParameterAddress, value: impl Into<String>) -> Self {
        Self {
            kind: CommandKind::Set,
            address,
            value: Some(value.into()),
        }
    }

    /// A get command reading the addressed parameter
    pub fn get(address: &'a ParameterAddress) -> Self {
        Self {
            kind: CommandKind::Get,
            address,
            value: None,
        }
    }

    /// Render the textual wire message.
    ///
    /// The value is only emitted for set commands; get commands never carry
    /// one, whether or not a value was supplied.
    pub fn to_wire(&self) -> String {
        let ParameterAddress {
            engine,
            component,
            parameter,
        } = self.address;

        let mut message = format!("{}:{engine}.{component}.{parameter}", self.kind);
        if self.kind == CommandKind::Set {
            if let Some(value) = &self.value {
                message.push('=');
                message.push_str(value);
            }
        }
        message
    }
}
