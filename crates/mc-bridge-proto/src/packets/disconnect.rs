//! Disconnect: closes the client session with a reason shown on screen.

use bytes::BufMut;

use crate::codec::{write_text_component, ProtoEncode};
use crate::packets::{Packet, PacketKind};

/// Disconnect packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disconnect {
    pub reason: String,
}

impl Disconnect {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Packet for Disconnect {
    const KIND: PacketKind = PacketKind::Disconnect;
}

impl ProtoEncode for Disconnect {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_text_component(buf, &self.reason);
    }
}
