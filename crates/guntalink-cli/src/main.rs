//! Command-line interface for the Guntalink heater bridge.

use anyhow::Result;
use clap::{Parser, Subcommand};
use guntalink_client::DeviceClient;
use guntalink_core::{DeviceConfig, SensorValue};
use guntalink_poller::{project_entities, PollCoordinator, SensorEntity};
use tracing::{info, warn};

/// Guntalink - bridge a Guntamatic heater's measurements to typed sensors.
#[derive(Parser, Debug)]
#[command(name = "guntalink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the device continuously and print sensor states per cycle.
    Run {
        /// Host (or host:port) of the device.
        #[arg(long)]
        host: String,
        /// Device label, used as the entity id prefix.
        #[arg(long, default_value = "Gunter")]
        name: String,
        /// Poll interval in seconds (minimum 1).
        #[arg(short, long, default_value_t = 30)]
        interval: u64,
        /// Emit one JSON object per sensor per cycle instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Run a single poll cycle and print the parsed measurements.
    Probe {
        /// Host (or host:port) of the device.
        #[arg(long)]
        host: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Run {
            host,
            name,
            interval,
            json,
        } => {
            let config = DeviceConfig::new(host)
                .with_name(name)
                .with_scan_interval(interval);
            run(config, json).await
        }
        Command::Probe { host } => probe(&host).await,
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "guntalink=debug"
    } else {
        "guntalink=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    // JSON format for production/container environments
    let json_logging = std::env::var("GUNTALINK_LOG_JSON")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false);

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Continuous polling mode.
async fn run(config: DeviceConfig, json: bool) -> Result<()> {
    let coordinator = PollCoordinator::new(config);
    let mut updates = coordinator.subscribe();
    coordinator.start();

    // Entities are classified once, from the units of the first successful
    // poll. Later unit changes do not reclassify.
    let mut entities: Option<Vec<SensorEntity>> = None;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(snapshot) = updates.borrow_and_update().clone() else {
                    continue;
                };
                let entities = entities.get_or_insert_with(|| {
                    let created = project_entities(&snapshot, &coordinator.config().name);
                    info!(count = created.len(), "created sensor entities");
                    created
                });
                print_states(entities, &snapshot, json);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                coordinator.stop();
                break;
            }
        }
    }
    Ok(())
}

fn print_states(
    entities: &[SensorEntity],
    snapshot: &guntalink_core::Snapshot,
    json: bool,
) {
    for entity in entities {
        let state = entity.state(snapshot);
        if json {
            let line = serde_json::json!({
                "entity_id": entity.entity_id,
                "kind": entity.kind,
                "unit": entity.unit,
                "state": state,
                "fetched_at": snapshot.fetched_at,
            });
            println!("{}", line);
        } else {
            match state {
                Some(SensorValue::Numeric(n)) => {
                    println!("{:<40} {} {}", entity.entity_id, n, entity.unit)
                }
                Some(SensorValue::Text(s)) => println!("{:<40} {}", entity.entity_id, s),
                None => println!("{:<40} <unavailable>", entity.entity_id),
            }
        }
    }
}

/// One-shot connectivity and parse check, the same probe a setup flow would
/// run before accepting a host.
async fn probe(host: &str) -> Result<()> {
    let client = DeviceClient::new();
    match client.poll(host).await {
        Ok(measurements) => {
            let mut fields: Vec<_> = measurements.iter().collect();
            fields.sort_by_key(|(name, _)| name.as_str());
            for (name, m) in fields {
                println!("{:<40} {:<12} {}", name, m.value, m.unit);
            }
            info!(host, fields = measurements.len(), "probe succeeded");
            Ok(())
        }
        Err(err) => {
            warn!(host, %err, "probe failed");
            Err(err.into())
        }
    }
}
