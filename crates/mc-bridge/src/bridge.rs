//! The facade every caller goes through.

use std::sync::{Arc, OnceLock};

use mc_bridge_proto::{PacketPayload, VersionIdentifier};
use tracing::{info, warn};

use crate::adapter::{CapabilityAdapter, TagItem, TagKind, TagValue};
use crate::error::BridgeError;
use crate::host::{ItemStack, PeerHandle};
use crate::registry::AdapterRegistry;
use crate::version::VersionProbe;

/// Outcome of the one-time resolution.
#[derive(Clone)]
pub enum BridgeState {
    Resolved(Arc<dyn CapabilityAdapter>),
    /// Terminal. `version` is what the probe reported, if it reported anything.
    Unsupported { version: Option<VersionIdentifier> },
}

impl std::fmt::Debug for BridgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BridgeState::Resolved(adapter) => {
                f.debug_tuple("Resolved").field(&adapter.name()).finish()
            }
            BridgeState::Unsupported { version } => f
                .debug_struct("Unsupported")
                .field("version", version)
                .finish(),
        }
    }
}

/// Resolves the host's adapter on first use and forwards every call to it.
///
/// The probe runs exactly once per `Bridge`, even when many threads make their
/// first call at the same time; the rest wait for that resolution and all see
/// the same outcome. An unsupported host stays unsupported: later calls fail
/// with [`BridgeError::BridgeUnsupported`] without probing again.
pub struct Bridge {
    probe: Box<dyn VersionProbe>,
    registry: AdapterRegistry,
    state: OnceLock<BridgeState>,
}

static GLOBAL: OnceLock<Bridge> = OnceLock::new();

impl Bridge {
    /// Bridge over the built-in adapter table.
    pub fn new(probe: impl VersionProbe + 'static) -> Result<Self, BridgeError> {
        Ok(Self::with_registry(probe, AdapterRegistry::builtin()?))
    }

    pub fn with_registry(probe: impl VersionProbe + 'static, registry: AdapterRegistry) -> Self {
        Self {
            probe: Box::new(probe),
            registry,
            state: OnceLock::new(),
        }
    }

    /// Make `bridge` the process-wide instance returned by [`Bridge::global`].
    pub fn install(bridge: Bridge) -> Result<&'static Bridge, BridgeError> {
        install_in(&GLOBAL, bridge)
    }

    pub fn global() -> Result<&'static Bridge, BridgeError> {
        global_in(&GLOBAL)
    }

    /// Resolution outcome, or `None` before the first call.
    pub fn state(&self) -> Option<&BridgeState> {
        self.state.get()
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    fn resolve(&self) -> &BridgeState {
        self.state.get_or_init(|| {
            let version = match self.probe.detect() {
                Ok(version) => version,
                Err(e) => {
                    warn!("Capability bridge unsupported: {e}");
                    return BridgeState::Unsupported { version: None };
                }
            };
            match self.registry.resolve(&version) {
                Some(adapter) => {
                    info!(
                        "Capability bridge resolved host {version} to adapter {}",
                        adapter.name()
                    );
                    BridgeState::Resolved(adapter)
                }
                None => {
                    warn!("Capability bridge unsupported: no adapter for host {version}");
                    BridgeState::Unsupported {
                        version: Some(version),
                    }
                }
            }
        })
    }

    /// The active adapter, resolving it on first use.
    pub fn adapter(&self) -> Result<&Arc<dyn CapabilityAdapter>, BridgeError> {
        match self.resolve() {
            BridgeState::Resolved(adapter) => Ok(adapter),
            BridgeState::Unsupported { version } => Err(BridgeError::BridgeUnsupported {
                version: version.clone(),
            }),
        }
    }

    /// Protocol to build [`PacketPayload`]s for.
    pub fn protocol(&self) -> Result<VersionIdentifier, BridgeError> {
        Ok(self.adapter()?.protocol().clone())
    }

    /// Open a buffered tag session on `item`.
    pub fn item(&self, item: ItemStack) -> Result<Box<dyn TagItem>, BridgeError> {
        self.adapter()?.open_item(item)
    }

    /// Upsert one tag and write the result back into `item`. On error `item`
    /// is left untouched.
    pub fn set_tag(
        &self,
        item: &mut ItemStack,
        key: &str,
        value: impl Into<TagValue>,
    ) -> Result<(), BridgeError> {
        let mut tags = self.item(item.clone())?;
        tags.set_tag(key, value.into())?;
        *item = tags.to_native_handle()?;
        Ok(())
    }

    pub fn get_tag(
        &self,
        item: &ItemStack,
        key: &str,
        kind: TagKind,
    ) -> Result<TagValue, BridgeError> {
        Ok(self.item(item.clone())?.get_tag(key, kind))
    }

    pub fn has_tag(&self, item: &ItemStack, key: &str) -> Result<bool, BridgeError> {
        Ok(self.item(item.clone())?.has_tag(key))
    }

    pub fn remove_tag(&self, item: &mut ItemStack, key: &str) -> Result<(), BridgeError> {
        let mut tags = self.item(item.clone())?;
        tags.remove_tag(key);
        *item = tags.to_native_handle()?;
        Ok(())
    }

    pub fn send_packet(
        &self,
        peer: &PeerHandle,
        payload: &PacketPayload,
    ) -> Result<(), BridgeError> {
        self.adapter()?.send_packet(peer, payload)
    }
}

fn install_in(
    slot: &'static OnceLock<Bridge>,
    bridge: Bridge,
) -> Result<&'static Bridge, BridgeError> {
    let mut installed = false;
    let current = slot.get_or_init(|| {
        installed = true;
        bridge
    });
    if installed {
        Ok(current)
    } else {
        Err(BridgeError::AlreadyInstalled)
    }
}

fn global_in(slot: &'static OnceLock<Bridge>) -> Result<&'static Bridge, BridgeError> {
    slot.get().ok_or(BridgeError::NotInitialized)
}
