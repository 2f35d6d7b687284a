//! Bridge error taxonomy.

use mc_bridge_nbt::NbtError;
use mc_bridge_proto::{PacketKind, VersionIdentifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host gave no usable version signal. The facade folds this into
    /// [`BridgeError::BridgeUnsupported`]; callers of the facade never see it.
    #[error("host exposes no readable version: {0}")]
    EnvironmentUnreadable(String),

    #[error(
        "no capability adapter for host version {}",
        .version.as_ref().map_or("<unreadable>", VersionIdentifier::as_str)
    )]
    BridgeUnsupported { version: Option<VersionIdentifier> },

    #[error("adapter {adapter} cannot send {kind} built for protocol {protocol}")]
    IncompatiblePacketType {
        adapter: &'static str,
        kind: PacketKind,
        protocol: VersionIdentifier,
    },

    #[error("tag key must not be empty")]
    InvalidKey,

    #[error("tag {key:?} needs {len} bytes, the host stores at most {limit}")]
    TagTooLong {
        key: String,
        len: usize,
        limit: usize,
    },

    #[error("item tag data is malformed: {0}")]
    MalformedItem(#[from] NbtError),

    #[error("peer {0} is disconnected")]
    PeerDisconnected(String),

    #[error("bridge is not initialized; install one before use")]
    NotInitialized,

    #[error("a bridge is already installed for this process")]
    AlreadyInstalled,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Problems in the static adapter table. Raised when the registry is built,
/// so a bad table stops startup instead of surfacing on first use.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("version {version} registered by both {first} and {second}")]
    DuplicateVersion {
        version: VersionIdentifier,
        first: &'static str,
        second: &'static str,
    },

    #[error("adapter {0} registered without any version")]
    NoVersions(&'static str),

    #[error("adapter {adapter} lists invalid version {raw:?}")]
    InvalidVersion { adapter: &'static str, raw: String },
}
