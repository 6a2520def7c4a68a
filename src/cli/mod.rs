//! CLI command handling
//!
//! Dispatches CLI commands to the command proxy and formats output.

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::Result;
use crate::map::AddressMap;
use crate::monitor::EventMonitor;
use crate::proxy::{CommandKind, CommandProxy};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::Set { name, value, json } => {
            let proxy = build_proxy(&config)?;
            let reply = proxy.send(CommandKind::Set, &name, Some(&value)).await?;
            print_reply(&name, &reply, json);
            Ok(())
        }

        Commands::Get { name, json } => {
            let proxy = build_proxy(&config)?;
            let reply = proxy.send(CommandKind::Get, &name, None).await?;
            print_reply(&name, &reply, json);
            Ok(())
        }

        Commands::Frequency { hz } => {
            let reply = build_proxy(&config)?.set_frequency(hz).await?;
            println!("{reply}");
            Ok(())
        }

        Commands::Rate { sps } => {
            let reply = build_proxy(&config)?.set_rate(sps).await?;
            println!("{reply}");
            Ok(())
        }

        Commands::Gain { db } => {
            let reply = build_proxy(&config)?.set_gain(db).await?;
            println!("{reply}");
            Ok(())
        }

        Commands::Bandwidth { hz } => {
            let reply = build_proxy(&config)?.set_bandwidth(hz).await?;
            println!("{reply}");
            Ok(())
        }

        Commands::Map { csv } => {
            let path = csv.unwrap_or_else(|| config.map.csv.clone());
            let map = AddressMap::load(&path)?;

            if map.is_empty() {
                println!("No parameters mapped in {}", path.display());
            } else {
                println!("Parameters in {}:", path.display());
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by_key(|(name, _)| name.to_string());
                for (name, address) in entries {
                    println!(
                        "  {name} -> {}.{}.{}",
                        address.engine, address.component, address.parameter
                    );
                }
            }
            Ok(())
        }

        Commands::Monitor => run_monitor(&config).await,
    }
}

/// Load the address map and build a proxy for the configured endpoint
fn build_proxy(config: &Config) -> Result<CommandProxy> {
    let map = AddressMap::load(&config.map.csv)?;
    Ok(CommandProxy::new(
        config.endpoint.host.clone(),
        config.endpoint.client_port,
        map,
    ))
}

fn print_reply(name: &str, reply: &str, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({ "name": name, "reply": reply })
        );
    } else {
        println!("{reply}");
    }
}

/// Run the event listener in the foreground until Ctrl-C
async fn run_monitor(config: &Config) -> Result<()> {
    let monitor = EventMonitor::bind(
        &config.monitor.host,
        config.monitor.server_port,
        config.monitor.receive_buffer,
    )
    .await?;

    println!(
        "Monitoring radio events on {} (Ctrl-C to stop)",
        monitor.local_addr()
    );

    tokio::signal::ctrl_c().await?;

    let counters = monitor.counters();
    monitor.shutdown().await;

    println!("tx events: {}", counters.tx_count());
    println!("rx events: {}", counters.rx_count());
    Ok(())
}
