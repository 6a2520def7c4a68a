//! radioctl - command-line control proxy for software-defined radios
//!
//! Translates logical parameter names into textual commands understood by a
//! running radio process, one short-lived TCP connection per command.

use clap::Parser;
use radioctl::commands::Commands;
use radioctl::{cli, common::logging};

#[derive(Parser)]
#[command(name = "radioctl", about = "SDR parameter control proxy")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Monitor mode runs until interrupted, so it also logs to a file
    match cli.command {
        Commands::Monitor => {
            logging::init_monitor();
        }
        _ => logging::init_cli(),
    }

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
