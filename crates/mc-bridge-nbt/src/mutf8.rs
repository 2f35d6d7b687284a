//! Java's modified UTF-8, the string encoding inside NBT.
//!
//! Differs from UTF-8 in two places: NUL is written as `C0 80`, and characters
//! outside the BMP are written as a UTF-16 surrogate pair, three bytes each.

use crate::error::NbtError;

/// Encoded length of `s` in bytes.
pub fn encoded_len(s: &str) -> usize {
    s.chars()
        .map(|c| match c as u32 {
            0 => 2,
            0x01..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xFFFF => 3,
            _ => 6,
        })
        .sum()
}

pub(crate) fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(s));
    let mut units = [0u16; 2];
    for c in s.chars() {
        for &unit in c.encode_utf16(&mut units).iter() {
            push_unit(&mut out, unit);
        }
    }
    out
}

fn push_unit(out: &mut Vec<u8>, unit: u16) {
    match unit {
        0x01..=0x7F => out.push(unit as u8),
        0x00 | 0x80..=0x7FF => {
            out.push(0xC0 | (unit >> 6) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
        _ => {
            out.push(0xE0 | (unit >> 12) as u8);
            out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
            out.push(0x80 | (unit & 0x3F) as u8);
        }
    }
}

pub(crate) fn decode(bytes: &[u8]) -> Result<String, NbtError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let (unit, width) = match b {
            0x01..=0x7F => (b as u16, 1),
            0xC0..=0xDF => {
                let b1 = continuation(bytes, i + 1)?;
                (((b as u16 & 0x1F) << 6) | b1, 2)
            }
            0xE0..=0xEF => {
                let b1 = continuation(bytes, i + 1)?;
                let b2 = continuation(bytes, i + 2)?;
                (((b as u16 & 0x0F) << 12) | (b1 << 6) | b2, 3)
            }
            _ => return Err(NbtError::InvalidUtf8),
        };
        units.push(unit);
        i += width;
    }
    String::from_utf16(&units).map_err(|_| NbtError::InvalidUtf8)
}

fn continuation(bytes: &[u8], at: usize) -> Result<u16, NbtError> {
    match bytes.get(at) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(NbtError::InvalidUtf8),
    }
}
