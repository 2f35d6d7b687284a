//! NBT (Named Binary Tag) model and codec for host item storage.
//!
//! The layout is the host's own: big-endian fixed-width numbers, `i32` array
//! and list lengths, and strings as a `u16` byte count followed by modified
//! UTF-8 (see [`mutf8`]).

pub mod error;
mod io;
pub mod mutf8;
pub mod tag;

pub use error::NbtError;
pub use io::MAX_STRING_LEN;
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Read a root compound.
pub fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_root(buf)
}

/// Write a root compound. Fails if any name or string value encodes to more
/// than [`MAX_STRING_LEN`] bytes; `buf` may then hold a partial write.
pub fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) -> Result<(), NbtError> {
    io::write_root(buf, root)
}

/// Decode a complete blob. Bytes left after the root compound are an error.
pub fn from_bytes(data: &[u8]) -> Result<NbtRoot, NbtError> {
    let mut buf = data;
    let root = read_nbt(&mut buf)?;
    if buf.has_remaining() {
        return Err(NbtError::TrailingBytes(buf.remaining()));
    }
    Ok(root)
}

/// Encode a root compound into a fresh blob.
pub fn to_bytes(root: &NbtRoot) -> Result<Bytes, NbtError> {
    let mut buf = BytesMut::new();
    write_nbt(&mut buf, root)?;
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_root() -> NbtRoot {
        let mut tag = NbtCompound::new();
        tag.insert("owner".into(), NbtTag::String("Steve".into()));
        tag.insert("soulbound".into(), NbtTag::Byte(1));
        tag.insert("charges".into(), NbtTag::Int(-7));
        tag.insert("created".into(), NbtTag::Long(1_700_000_000_000));
        tag.insert("chance".into(), NbtTag::Double(0.25));
        tag.insert("lore".into(), NbtTag::List(vec![NbtTag::String("a\0b".into())]));
        tag.insert("ids".into(), NbtTag::IntArray(vec![1, -1]));

        let mut root = NbtCompound::new();
        root.insert("id".into(), NbtTag::String("minecraft:diamond_sword".into()));
        root.insert("Count".into(), NbtTag::Byte(1));
        root.insert("tag".into(), NbtTag::Compound(tag));
        NbtRoot::new("", root)
    }

    #[test]
    fn item_blob_decodes_to_same_tree() {
        let root = item_root();
        let blob = to_bytes(&root).unwrap();
        assert_eq!(from_bytes(&blob).unwrap(), root);
    }

    #[test]
    fn numbers_are_big_endian() {
        let mut c = NbtCompound::new();
        c.insert("v".into(), NbtTag::Int(1));
        let blob = to_bytes(&NbtRoot::new("", c)).unwrap();
        // root header: type, u16 name length 0
        // entry: type 3, u16 length 1, "v", i32 1, then TAG_End
        assert_eq!(&blob[..], &[10, 0, 0, 3, 0, 1, b'v', 0, 0, 0, 1, 0]);
    }

    #[test]
    fn empty_list_written_as_end_typed() {
        let mut c = NbtCompound::new();
        c.insert("l".into(), NbtTag::List(vec![]));
        let bytes = to_bytes(&NbtRoot::new("", c)).unwrap();
        // root header (3) + entry header (1 + 2 + 1) then element type TAG_End
        assert_eq!(bytes[7], NbtTag::END);
    }

    #[test]
    fn oversized_string_fails_write() {
        let mut c = NbtCompound::new();
        c.insert("lore".into(), NbtTag::String("a".repeat(MAX_STRING_LEN + 1)));
        match to_bytes(&NbtRoot::new("", c)) {
            Err(NbtError::StringTooLong { len, limit }) => {
                assert_eq!(len, MAX_STRING_LEN + 1);
                assert_eq!(limit, MAX_STRING_LEN);
            }
            other => panic!("expected StringTooLong, got {other:?}"),
        }
    }

    #[test]
    fn longest_string_still_fits() {
        let mut c = NbtCompound::new();
        c.insert("lore".into(), NbtTag::String("a".repeat(MAX_STRING_LEN)));
        let root = NbtRoot::new("", c);
        assert_eq!(from_bytes(&to_bytes(&root).unwrap()).unwrap(), root);
    }

    #[test]
    fn empty_buffer_error() {
        assert!(matches!(from_bytes(&[]), Err(NbtError::UnexpectedEof)));
    }

    #[test]
    fn wrong_root_type_error() {
        assert!(matches!(
            from_bytes(&[1]),
            Err(NbtError::ExpectedCompound { got: 1 })
        ));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut blob = to_bytes(&NbtRoot::default()).unwrap().to_vec();
        blob.push(0xAA);
        assert!(matches!(from_bytes(&blob), Err(NbtError::TrailingBytes(1))));
    }

    #[test]
    fn negative_array_length_rejected() {
        // root "" { ByteArray "a" len -1 }
        let blob = [10, 0, 0, 7, 0, 1, b'a', 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            from_bytes(&blob),
            Err(NbtError::NegativeLength(-1))
        ));
    }

    #[test]
    fn huge_array_length_fails_before_allocating() {
        // root "" { LongArray "a" len i32::MAX }
        let blob = [10, 0, 0, 12, 0, 1, b'a', 0x7F, 0xFF, 0xFF, 0xFF];
        assert!(matches!(from_bytes(&blob), Err(NbtError::UnexpectedEof)));
    }

    #[test]
    fn unknown_tag_type_rejected() {
        let blob = [10, 0, 0, 42, 0, 1, b'a'];
        assert!(matches!(
            from_bytes(&blob),
            Err(NbtError::UnknownTagType(42))
        ));
    }
}
