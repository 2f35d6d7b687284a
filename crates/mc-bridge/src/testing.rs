//! Version-source and adapter doubles shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mc_bridge_proto::{PacketKind, PacketPayload, VersionIdentifier};

use crate::adapter::{CapabilityAdapter, TagItem};
use crate::adapters::V1_18R1;
use crate::error::BridgeError;
use crate::host::{ItemStack, PeerHandle};
use crate::version::VersionProbe;

/// Counts `detect` calls. `None` behaves like a host without a version signal.
pub struct CountingProbe {
    calls: Arc<AtomicUsize>,
    version: Option<&'static str>,
}

impl CountingProbe {
    pub fn new(version: Option<&'static str>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = Self {
            calls: Arc::clone(&calls),
            version,
        };
        (probe, calls)
    }
}

impl VersionProbe for CountingProbe {
    fn detect(&self) -> Result<VersionIdentifier, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let raw = self
            .version
            .ok_or_else(|| BridgeError::EnvironmentUnreadable("no signal".into()))?;
        VersionIdentifier::new(raw).map_err(|e| BridgeError::EnvironmentUnreadable(e.to_string()))
    }
}

/// Adapter with a chosen label that sends nothing. Items are handled like
/// `v1_18_R1`.
pub struct NamedAdapter {
    name: &'static str,
    protocol: VersionIdentifier,
}

impl NamedAdapter {
    pub fn new(name: &'static str, protocol: &str) -> Self {
        Self {
            name,
            protocol: VersionIdentifier::new(protocol).unwrap(),
        }
    }
}

impl CapabilityAdapter for NamedAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn protocol(&self) -> &VersionIdentifier {
        &self.protocol
    }

    fn packet_id(&self, _kind: PacketKind) -> Option<i32> {
        None
    }

    fn open_item(&self, item: ItemStack) -> Result<Box<dyn TagItem>, BridgeError> {
        V1_18R1.open_item(item)
    }

    fn send_packet(&self, _peer: &PeerHandle, payload: &PacketPayload) -> Result<(), BridgeError> {
        Err(BridgeError::IncompatiblePacketType {
            adapter: self.name,
            kind: payload.kind,
            protocol: payload.protocol.clone(),
        })
    }
}
