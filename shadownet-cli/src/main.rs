//! shadownet binary
//!
//! Mirrors the underlying host interface into the registry, attaches a
//! shadow interface to it, then pumps live frames from a raw datalink
//! channel through the receive tap until interrupted. On Ctrl-C the
//! shadow closes, detaches, and the final counters are printed.

mod args;

use args::{Cli, Commands};
use clap::Parser;
use pnet_datalink::Channel;
use shadownet_core::{Error, Frame, Result};
use shadownet_stack::{
    list_host_interfaces, mirror_host_interface, DatalinkTransport, InterfaceRegistry, LinkStats,
    ShadowConfig, ShadowInterface,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn list_interfaces() -> Result<()> {
    for iface in list_host_interfaces()? {
        let mac = iface
            .mac
            .map(|m| m.to_string())
            .unwrap_or_else(|| "no mac".to_string());
        let state = if iface.is_up { "up" } else { "down" };
        println!("{:<16} {:<18} {}", iface.name, mac, state);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let registry = Arc::new(InterfaceRegistry::new());
    let parent = mirror_host_interface(&registry, &cli.link)?;

    let transport = Arc::new(DatalinkTransport::open(&cli.link)?);
    let config = ShadowConfig {
        link: cli.link.clone(),
        ifname: cli.ifname.clone(),
    };
    let shadow = ShadowInterface::attach(
        Arc::clone(&registry),
        &config,
        LinkStats::new(),
        transport,
    )?;
    shadow.open();

    // Live receive pump: every frame arriving on the underlying host
    // interface is fed through the registry entry's receive path, where
    // the tap observes it.
    let running = Arc::new(AtomicBool::new(true));
    let pump = spawn_receive_pump(&cli.link, Arc::clone(&parent), Arc::clone(&running))?;

    let running_for_handler = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_for_handler.store(false, Ordering::SeqCst);
    })
    .map_err(|e| Error::datalink(format!("failed to install signal handler: {}", e)))?;

    info!("shadowing {} as {}, Ctrl-C to stop", cli.link, shadow.name());
    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(200));
    }

    if pump.join().is_err() {
        error!("receive pump panicked");
    }

    shadow.close();
    let snap = shadow.stats();
    info!(
        "final counters: rx {} packets / {} bytes, tx {} packets / {} bytes",
        snap.rx_packets, snap.rx_bytes, snap.tx_packets, snap.tx_bytes
    );
    shadow.detach();

    Ok(())
}

fn spawn_receive_pump(
    link: &str,
    parent: Arc<shadownet_stack::NetInterface>,
    running: Arc<AtomicBool>,
) -> Result<thread::JoinHandle<()>> {
    let interface = pnet_datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == link)
        .ok_or_else(|| Error::NoSuchInterface(link.to_string()))?;

    let config = pnet_datalink::Config {
        read_timeout: Some(Duration::from_millis(500)),
        ..Default::default()
    };
    let mut rx = match pnet_datalink::channel(&interface, config) {
        Ok(Channel::Ethernet(_, rx)) => rx,
        Ok(_) => return Err(Error::datalink("unsupported channel type")),
        Err(e) => return Err(Error::datalink(format!("failed to open channel: {}", e))),
    };

    let link = link.to_string();
    Ok(thread::spawn(move || {
        while running.load(Ordering::SeqCst) {
            match rx.next() {
                Ok(bytes) => {
                    let frame = Frame::new(bytes.to_vec());
                    parent.receive(&frame);
                }
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => {
                    error!("{}: receive error: {}", link, e);
                    break;
                }
            }
        }
        debug!("{}: receive pump stopped", link);
    }))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Commands::Interfaces) => list_interfaces(),
        None => run(&cli),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
