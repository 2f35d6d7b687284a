//! Variable-length integers used for packet ids, lengths and small fields.

use std::fmt;

use bytes::BufMut;

use crate::codec::ProtoEncode;

/// Signed 32-bit integer in LEB128 groups of seven bits, least significant
/// first. Negative values are written as their two's complement and always
/// take five bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarInt(pub i32);

impl ProtoEncode for VarInt {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        let mut value = self.0 as u32;
        while value & !0x7F != 0 {
            buf.put_u8((value & 0x7F | 0x80) as u8);
            value >>= 7;
        }
        buf.put_u8(value as u8);
    }
}

impl fmt::Debug for VarInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarInt({})", self.0)
    }
}
