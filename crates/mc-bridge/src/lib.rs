//! Runtime capability bridge.
//!
//! Code built against this crate uses one stable set of operations (custom
//! item tags and outbound packets) while the host it runs on may be any of
//! several incompatible revisions. On first use the [`Bridge`] asks a
//! [`VersionProbe`] which revision is running, picks the matching
//! [`CapabilityAdapter`] from the [`AdapterRegistry`], and forwards every
//! later call to it.
//!
//! ```no_run
//! use mc_bridge::{Bridge, EnvProbe, ItemStack, TagKind};
//!
//! # fn main() -> Result<(), mc_bridge::BridgeError> {
//! let bridge = Bridge::install(Bridge::new(EnvProbe::new())?)?;
//! let mut item = ItemStack::new("minecraft:diamond_sword", 1);
//! bridge.set_tag(&mut item, "power", 5)?;
//! assert!(bridge.has_tag(&item, "power")?);
//! let _power = bridge.get_tag(&item, "power", TagKind::Int)?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod adapters;
pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod version;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{CapabilityAdapter, TagItem, TagKind, TagValue};
pub use bridge::{Bridge, BridgeState};
pub use config::{BridgeConfig, ConfigError};
pub use error::{BridgeError, RegistryError};
pub use host::{ChannelConnection, ConnectionClosed, ItemStack, PeerConnection, PeerHandle};
pub use registry::{AdapterRegistry, RegistryBuilder};
pub use version::{EnvProbe, FixedProbe, HostProbe, VersionIdentifier, VersionProbe};

pub use mc_bridge_proto::{packets, PacketKind, PacketPayload};
