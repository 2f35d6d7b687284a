//! Big-endian read/write engine.

use bytes::{Buf, BufMut};

use crate::error::NbtError;
use crate::mutf8;
use crate::tag::{NbtCompound, NbtRoot, NbtTag};

/// Maximum nesting depth to prevent stack overflow.
const MAX_DEPTH: usize = 512;

/// Encoded string lengths are a `u16`.
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

fn ensure(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::UnexpectedEof)
    } else {
        Ok(())
    }
}

// -----------------------------------------------------------------------
// Reading
// -----------------------------------------------------------------------

pub(crate) fn read_root(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    ensure(buf, 1)?;
    let tag_type = buf.get_u8();
    if tag_type != NbtTag::COMPOUND {
        return Err(NbtError::ExpectedCompound { got: tag_type });
    }
    let name = read_string(buf)?;
    let compound = read_compound(buf, 0)?;
    Ok(NbtRoot { name, compound })
}

fn read_len(buf: &mut impl Buf) -> Result<usize, NbtError> {
    ensure(buf, 4)?;
    let len = buf.get_i32();
    usize::try_from(len).map_err(|_| NbtError::NegativeLength(len))
}

fn read_array<B: Buf, T>(
    buf: &mut B,
    len: usize,
    width: usize,
    read: impl Fn(&mut B) -> T,
) -> Result<Vec<T>, NbtError> {
    ensure(buf, len.saturating_mul(width))?;
    Ok((0..len).map(|_| read(buf)).collect())
}

fn read_payload(buf: &mut impl Buf, tag_type: u8, depth: usize) -> Result<NbtTag, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }

    let tag = match tag_type {
        1 => {
            ensure(buf, 1)?;
            NbtTag::Byte(buf.get_i8())
        }
        2 => {
            ensure(buf, 2)?;
            NbtTag::Short(buf.get_i16())
        }
        3 => {
            ensure(buf, 4)?;
            NbtTag::Int(buf.get_i32())
        }
        4 => {
            ensure(buf, 8)?;
            NbtTag::Long(buf.get_i64())
        }
        5 => {
            ensure(buf, 4)?;
            NbtTag::Float(buf.get_f32())
        }
        6 => {
            ensure(buf, 8)?;
            NbtTag::Double(buf.get_f64())
        }
        7 => {
            let len = read_len(buf)?;
            NbtTag::ByteArray(read_array(buf, len, 1, |b| b.get_i8())?)
        }
        8 => NbtTag::String(read_string(buf)?),
        9 => {
            ensure(buf, 1)?;
            let element_type = buf.get_u8();
            let len = read_len(buf)?;
            if element_type == NbtTag::END && len > 0 {
                return Err(NbtError::UnknownTagType(NbtTag::END));
            }
            let mut list = Vec::new();
            for _ in 0..len {
                list.push(read_payload(buf, element_type, depth + 1)?);
            }
            NbtTag::List(list)
        }
        10 => NbtTag::Compound(read_compound(buf, depth + 1)?),
        11 => {
            let len = read_len(buf)?;
            NbtTag::IntArray(read_array(buf, len, 4, |b| b.get_i32())?)
        }
        12 => {
            let len = read_len(buf)?;
            NbtTag::LongArray(read_array(buf, len, 8, |b| b.get_i64())?)
        }
        other => return Err(NbtError::UnknownTagType(other)),
    };
    Ok(tag)
}

fn read_compound(buf: &mut impl Buf, depth: usize) -> Result<NbtCompound, NbtError> {
    if depth > MAX_DEPTH {
        return Err(NbtError::NestingTooDeep { limit: MAX_DEPTH });
    }
    let mut map = NbtCompound::new();
    loop {
        ensure(buf, 1)?;
        let tag_type = buf.get_u8();
        if tag_type == NbtTag::END {
            return Ok(map);
        }
        let name = read_string(buf)?;
        let tag = read_payload(buf, tag_type, depth)?;
        map.insert(name, tag);
    }
}

fn read_string(buf: &mut impl Buf) -> Result<String, NbtError> {
    ensure(buf, 2)?;
    let len = buf.get_u16() as usize;
    ensure(buf, len)?;
    let data = buf.copy_to_bytes(len);
    mutf8::decode(&data)
}

// -----------------------------------------------------------------------
// Writing
// -----------------------------------------------------------------------

pub(crate) fn write_root(buf: &mut impl BufMut, root: &NbtRoot) -> Result<(), NbtError> {
    buf.put_u8(NbtTag::COMPOUND);
    write_string(buf, &root.name)?;
    write_compound(buf, &root.compound)
}

fn write_len(buf: &mut impl BufMut, len: usize) {
    buf.put_i32(len as i32);
}

fn write_payload(buf: &mut impl BufMut, tag: &NbtTag) -> Result<(), NbtError> {
    match tag {
        NbtTag::Byte(v) => buf.put_i8(*v),
        NbtTag::Short(v) => buf.put_i16(*v),
        NbtTag::Int(v) => buf.put_i32(*v),
        NbtTag::Long(v) => buf.put_i64(*v),
        NbtTag::Float(v) => buf.put_f32(*v),
        NbtTag::Double(v) => buf.put_f64(*v),
        NbtTag::ByteArray(arr) => {
            write_len(buf, arr.len());
            arr.iter().for_each(|&b| buf.put_i8(b));
        }
        NbtTag::String(s) => write_string(buf, s)?,
        NbtTag::List(list) => {
            // an empty list is typed TAG_End
            buf.put_u8(list.first().map_or(NbtTag::END, NbtTag::type_id));
            write_len(buf, list.len());
            for item in list {
                write_payload(buf, item)?;
            }
        }
        NbtTag::Compound(map) => write_compound(buf, map)?,
        NbtTag::IntArray(arr) => {
            write_len(buf, arr.len());
            arr.iter().for_each(|&v| buf.put_i32(v));
        }
        NbtTag::LongArray(arr) => {
            write_len(buf, arr.len());
            arr.iter().for_each(|&v| buf.put_i64(v));
        }
    }
    Ok(())
}

fn write_compound(buf: &mut impl BufMut, map: &NbtCompound) -> Result<(), NbtError> {
    for (name, tag) in map {
        buf.put_u8(tag.type_id());
        write_string(buf, name)?;
        write_payload(buf, tag)?;
    }
    buf.put_u8(NbtTag::END);
    Ok(())
}

fn write_string(buf: &mut impl BufMut, s: &str) -> Result<(), NbtError> {
    let data = mutf8::encode(s);
    if data.len() > MAX_STRING_LEN {
        return Err(NbtError::StringTooLong {
            len: data.len(),
            limit: MAX_STRING_LEN,
        });
    }
    buf.put_u16(data.len() as u16);
    buf.put_slice(&data);
    Ok(())
}
