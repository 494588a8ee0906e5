//! Tello Simulated Peer
//!
//! Answers on a UDP port the way the vehicle's command port does, for
//! exercising the client without hardware.

use std::time::Duration;

use clap::Parser;
use tello_command::network::{SimBehavior, SimPeer};
use tracing_subscriber::{fmt, EnvFilter};

/// Tello simulated peer
#[derive(Parser, Debug)]
#[command(name = "tello-sim")]
#[command(about = "Mock Tello command port")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8889")]
    listen: String,

    /// Reply to valid commands
    #[arg(short, long, default_value = "ok")]
    ack: String,

    /// Reply to lines that are not valid commands
    #[arg(short, long, default_value = "error")]
    error_reply: String,

    /// Delay before each reply, in milliseconds
    #[arg(short, long, default_value = "0")]
    delay_ms: u64,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tello_command=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Tello sim v{}", tello_command::VERSION);

    let behavior = SimBehavior {
        ack: args.ack,
        error_reply: args.error_reply,
        reply_delay: Duration::from_millis(args.delay_ms),
        silent: false,
    };

    let peer = match SimPeer::bind(&args.listen, behavior) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = peer.run() {
        tracing::error!("Simulated peer error: {}", e);
        std::process::exit(1);
    }
}
