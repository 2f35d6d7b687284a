//! Version-tagged outbound packet.

use bytes::{Bytes, BytesMut};

use crate::codec::ProtoEncode;
use crate::packets::{Packet, PacketKind};
use crate::version::VersionIdentifier;

/// One encoded outbound message plus the protocol revision it was built for.
///
/// The body holds only the packet fields; the adapter that accepts the
/// payload prepends the packet id from its own table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketPayload {
    pub protocol: VersionIdentifier,
    pub kind: PacketKind,
    pub body: Bytes,
}

impl PacketPayload {
    pub fn new(protocol: VersionIdentifier, kind: PacketKind, body: Bytes) -> Self {
        Self {
            protocol,
            kind,
            body,
        }
    }

    /// Encode `packet` for `protocol`.
    pub fn encode<P: Packet>(protocol: VersionIdentifier, packet: &P) -> Self {
        let mut buf = BytesMut::new();
        packet.proto_encode(&mut buf);
        Self::new(protocol, P::KIND, buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::{SetTime, Transfer};

    #[test]
    fn encode_tags_kind_and_protocol() {
        let protocol = VersionIdentifier::new("1.18").unwrap();
        let payload = PacketPayload::encode(protocol.clone(), &SetTime::new(0, 0));
        assert_eq!(payload.kind, PacketKind::SetTime);
        assert_eq!(payload.protocol, protocol);
        assert_eq!(&payload.body[..], &[0; 16]);
    }

    #[test]
    fn body_excludes_packet_id() {
        let protocol = VersionIdentifier::new("1.18").unwrap();
        let payload = PacketPayload::encode(protocol, &Transfer::new("", 1));
        assert_eq!(&payload.body[..], &[0, 1]);
    }
}
