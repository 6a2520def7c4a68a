//! radioctl - TCP command proxy for software-defined-radio parameters
//!
//! This library translates logical parameter names into textual wire commands
//! and executes them against a running radio process, one short-lived TCP
//! connection per command. A passive listener counts inbound event markers.

pub mod cli;
pub mod commands;
pub mod common;
pub mod map;
pub mod monitor;
pub mod proxy;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use map::{AddressMap, ParameterAddress};
pub use proxy::{CommandKind, CommandProxy};
