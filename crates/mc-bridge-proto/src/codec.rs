//! Protocol encoding trait and helpers.

use bytes::{BufMut, Bytes, BytesMut};

use crate::types::VarInt;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Write a protocol string (VarInt byte length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarInt(s.len() as i32).proto_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Write `text` as a plain JSON text component, `{"text":"..."}`.
pub fn write_text_component(buf: &mut impl BufMut, text: &str) {
    let component = serde_json::json!({ "text": text });
    write_string(buf, &component.to_string());
}

/// Frame an already-encoded body behind its packet id: `VarInt(id) ++ body`.
pub fn frame_packet(packet_id: i32, body: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(body.len() + 2);
    VarInt(packet_id).proto_encode(&mut buf);
    buf.put_slice(body);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_length_prefixed_utf8() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "日本");
        assert_eq!(buf[0], 6);
        assert_eq!(&buf[1..], "日本".as_bytes());
    }

    #[test]
    fn text_component_escapes_json() {
        let mut buf = BytesMut::new();
        write_text_component(&mut buf, "say \"hi\"");
        let json = std::str::from_utf8(&buf[1..]).unwrap();
        assert_eq!(buf[0] as usize, json.len());
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["text"], "say \"hi\"");
    }

    #[test]
    fn frame_prefixes_packet_id() {
        let framed = frame_packet(0x59, &[1, 2, 3]);
        assert_eq!(&framed[..], &[0x59, 1, 2, 3]);

        let framed = frame_packet(0x80, &[]);
        assert_eq!(&framed[..], &[0x80, 0x01]);
    }
}
