//! CLI command definitions
//!
//! Defines the clap commands for radioctl.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Set a parameter by its logical name
    Set {
        /// Logical name from the address map
        name: String,

        /// Value to write
        value: String,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a parameter by its logical name
    Get {
        /// Logical name from the address map
        name: String,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the carrier frequency
    #[command(alias = "freq")]
    Frequency {
        /// Frequency in hertz
        hz: u64,
    },

    /// Set the sample rate
    Rate {
        /// Sample rate in samples per second
        sps: u64,
    },

    /// Set the gain
    Gain {
        /// Gain in dB
        db: f64,
    },

    /// Set the bandwidth
    Bandwidth {
        /// Bandwidth in hertz
        hz: u64,
    },

    /// Load and print the address map
    Map {
        /// CSV file to load instead of the configured one
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Run the passive event listener until interrupted
    Monitor,
}
