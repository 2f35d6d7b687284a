//! Wire-level building blocks shared by every version adapter: variable-length
//! integers, protocol strings, the outbound packet bodies the bridge knows how
//! to build, and the version-tagged [`PacketPayload`] handed to adapters.

pub mod codec;
pub mod error;
pub mod packets;
pub mod payload;
pub mod types;
pub mod version;

pub use error::ProtoError;
pub use packets::PacketKind;
pub use payload::PacketPayload;
pub use version::VersionIdentifier;
