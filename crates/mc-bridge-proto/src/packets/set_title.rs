//! SetTitle: the large centered title text.

use bytes::BufMut;

use crate::codec::{write_text_component, ProtoEncode};
use crate::packets::{Packet, PacketKind};

/// SetTitle packet. Fade timings use the client's current settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTitle {
    pub text: String,
}

impl SetTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Packet for SetTitle {
    const KIND: PacketKind = PacketKind::SetTitle;
}

impl ProtoEncode for SetTitle {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_text_component(buf, &self.text);
    }
}
