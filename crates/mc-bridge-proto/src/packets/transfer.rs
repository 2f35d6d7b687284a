//! Transfer: moves the client to another server.

use bytes::BufMut;

use crate::codec::{write_string, ProtoEncode};
use crate::packets::{Packet, PacketKind};
use crate::types::VarInt;

/// Transfer packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// Hostname or IP.
    pub host: String,
    pub port: u16,
}

impl Transfer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Packet for Transfer {
    const KIND: PacketKind = PacketKind::Transfer;
}

impl ProtoEncode for Transfer {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.host);
        VarInt(self.port.into()).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_transfer() {
        let mut buf = BytesMut::new();
        Transfer::new("hub", 25565).proto_encode(&mut buf);
        assert_eq!(&buf[..], &[3, b'h', b'u', b'b', 0xDD, 0xC7, 0x01]);
    }
}
