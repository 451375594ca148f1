use std::net::SocketAddrV6;
use std::path::PathBuf;
use std::sync::atomic::Ordering;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serabut6::server::{list_interfaces, ServedInterface};
use serabut6::{Config, Duid, Responder, ResponseBuilder};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "serabut6d")]
#[command(about = "DHCPv6 PXE boot responder - answers network boot requests")]
struct Args {
    /// Config file path (defaults to $SERABUT6_CONFIG or /etc/serabut6.conf)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network interface to serve (e.g., eth0)
    #[arg(short, long)]
    interface: Option<String>,

    /// List available network interfaces and exit
    #[arg(long)]
    list_interfaces: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_interfaces {
        for iface in list_interfaces() {
            println!("{}", iface);
        }
        return Ok(());
    }

    let config_path = args.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(interface) = args.interface {
        config.interface = Some(interface);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.tracing_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting serabut6d DHCPv6 PXE responder");
    info!("Config path: {:?}", config_path);

    let interface = match &config.interface {
        Some(name) => Some(ServedInterface::by_name(name)?),
        None => match ServedInterface::default_interface() {
            Ok(iface) => Some(iface),
            Err(e) => {
                warn!("{}; joining multicast on the default interface", e);
                None
            }
        },
    };

    if let Some(iface) = &interface {
        info!("Interface: {} (index {})", iface.name, iface.index);
    }

    let server_id = match (&config.server_duid, interface.as_ref().and_then(|i| i.mac)) {
        (Some(duid), _) => duid.clone(),
        (None, Some(mac)) => Duid::link_layer(mac),
        (None, None) => {
            return Err(anyhow!(
                "No server_duid configured and no interface MAC address to derive one from"
            ))
        }
    };

    let scope_id = interface.as_ref().map(|i| i.index).unwrap_or(0);
    let bind_addr = SocketAddrV6::new(config.bind_address, config.port, 0, scope_id);

    let responder = Responder::new(server_id, ResponseBuilder::new(config.boot.clone()), bind_addr)
        .with_interface_index(scope_id);

    let running = responder.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })
    .context("Failed to install signal handler")?;

    responder.run()
}
