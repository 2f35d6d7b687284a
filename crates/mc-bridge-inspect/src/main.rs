use std::io;
use std::process::exit;
use std::sync::Arc;

use mc_bridge::packets::{Disconnect, SetTime, SetTitle, Transfer};
use mc_bridge::{
    Bridge, BridgeConfig, ChannelConnection, ConfigError, EnvProbe, PacketKind, PacketPayload,
    PeerHandle,
};
use tracing::{debug, error, info, warn};

/// Overrides the config file location.
const CONFIG_ENV: &str = "MC_BRIDGE_CONFIG";
const DEFAULT_CONFIG: &str = "bridge.toml";

#[tokio::main]
async fn main() {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG.into());
    let config = match BridgeConfig::load(&path) {
        Ok(c) => c,
        Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => BridgeConfig::default(),
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("mc-bridge-inspect v{}", env!("CARGO_PKG_VERSION"));

    let probe = match config.probe(Box::new(EnvProbe::new())) {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };
    if let Some(version) = &config.bridge.version_override {
        info!("Host detection overridden: {version}");
    }

    let bridge = match Bridge::new(probe).and_then(Bridge::install) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to set up bridge: {e}");
            exit(1);
        }
    };

    let versions: Vec<&str> = bridge.registry().versions().iter().map(|v| v.as_str()).collect();
    info!("Known host versions: {}", versions.join(", "));

    let adapter = match bridge.adapter() {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    };
    info!(
        "Active adapter: {} (protocol {})",
        adapter.name(),
        adapter.protocol()
    );
    for kind in PacketKind::ALL {
        match adapter.packet_id(kind) {
            Some(id) => info!("  {kind}: 0x{id:02X}"),
            None => info!("  {kind}: not available"),
        }
    }

    // Push one of each packet through a loopback peer.
    let (connection, mut rx) = ChannelConnection::new();
    let writer = tokio::spawn(async move {
        let mut frames = 0usize;
        while let Some(frame) = rx.recv().await {
            debug!("Loopback peer got {} bytes", frame.len());
            frames += 1;
        }
        frames
    });

    let peer = PeerHandle::new("loopback", Arc::new(connection));
    let protocol = adapter.protocol().clone();
    let payloads = [
        PacketPayload::encode(protocol.clone(), &SetTime::new(0, 6000)),
        PacketPayload::encode(protocol.clone(), &SetTitle::new("mc-bridge")),
        PacketPayload::encode(protocol.clone(), &Transfer::new("127.0.0.1", 19132)),
        PacketPayload::encode(protocol, &Disconnect::new("inspection finished")),
    ];
    for payload in &payloads {
        match bridge.send_packet(&peer, payload) {
            Ok(()) => info!("{} accepted", payload.kind),
            Err(e) => warn!("{} rejected: {e}", payload.kind),
        }
    }
    drop(peer);

    match writer.await {
        Ok(frames) => info!("Loopback peer received {frames} frames"),
        Err(e) => error!("Loopback writer failed: {e}"),
    }
}
