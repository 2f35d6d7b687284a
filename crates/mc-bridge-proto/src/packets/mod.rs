//! Outbound packet bodies the bridge can build for callers.
//!
//! Packet ids are not listed here: they move between host revisions, so each
//! version adapter owns its own `PacketKind -> id` table.

pub mod disconnect;
pub mod set_time;
pub mod set_title;
pub mod transfer;

pub use disconnect::Disconnect;
pub use set_time::SetTime;
pub use set_title::SetTitle;
pub use transfer::Transfer;

use std::fmt;

use crate::codec::ProtoEncode;

/// Every packet body this crate knows how to encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    Disconnect,
    SetTime,
    SetTitle,
    Transfer,
}

impl PacketKind {
    pub const ALL: [PacketKind; 4] = [
        PacketKind::Disconnect,
        PacketKind::SetTime,
        PacketKind::SetTitle,
        PacketKind::Transfer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PacketKind::Disconnect => "Disconnect",
            PacketKind::SetTime => "SetTime",
            PacketKind::SetTitle => "SetTitle",
            PacketKind::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A packet body that knows which [`PacketKind`] it is.
pub trait Packet: ProtoEncode {
    const KIND: PacketKind;
}
