//! NBT tag types.

use std::collections::HashMap;

/// A compound tag: map of name -> tag.
pub type NbtCompound = HashMap<String, NbtTag>;

/// A named root compound (the root always has a name, often empty string).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtRoot {
    pub name: String,
    pub compound: NbtCompound,
}

impl NbtRoot {
    pub fn new(name: impl Into<String>, compound: NbtCompound) -> Self {
        Self {
            name: name.into(),
            compound,
        }
    }
}

/// Represents any NBT value.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    pub const END: u8 = 0;
    pub const COMPOUND: u8 = 10;

    /// Numeric tag type id (1-12). TAG_End is 0 and has no variant.
    pub fn type_id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => 1,
            NbtTag::Short(_) => 2,
            NbtTag::Int(_) => 3,
            NbtTag::Long(_) => 4,
            NbtTag::Float(_) => 5,
            NbtTag::Double(_) => 6,
            NbtTag::ByteArray(_) => 7,
            NbtTag::String(_) => 8,
            NbtTag::List(_) => 9,
            NbtTag::Compound(_) => 10,
            NbtTag::IntArray(_) => 11,
            NbtTag::LongArray(_) => 12,
        }
    }

    /// Integer view of a numeric tag. Floating values round toward negative
    /// infinity and saturate at the `i64` range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            NbtTag::Byte(v) => Some(v.into()),
            NbtTag::Short(v) => Some(v.into()),
            NbtTag::Int(v) => Some(v.into()),
            NbtTag::Long(v) => Some(v),
            NbtTag::Float(v) => Some(v.floor() as i64),
            NbtTag::Double(v) => Some(v.floor() as i64),
            _ => None,
        }
    }

    /// 32-bit view of a numeric tag. Integer tags keep their low 32 bits;
    /// floating values round toward negative infinity and saturate at the
    /// `i32` range.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            NbtTag::Float(v) => Some(v.floor() as i32),
            NbtTag::Double(v) => Some(v.floor() as i32),
            _ => self.as_i64().map(|v| v as i32),
        }
    }

    /// Floating view of a numeric tag.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            NbtTag::Float(v) => Some(v.into()),
            NbtTag::Double(v) => Some(v),
            NbtTag::Long(v) => Some(v as f64),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NbtTag::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&NbtCompound> {
        match self {
            NbtTag::Compound(v) => Some(v),
            _ => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_views() {
        assert_eq!(NbtTag::Byte(-3).as_i64(), Some(-3));
        assert_eq!(NbtTag::Double(2.9).as_i64(), Some(2));
        assert_eq!(NbtTag::Double(-2.1).as_i64(), Some(-3));
        assert_eq!(NbtTag::Int(7).as_f64(), Some(7.0));
        assert_eq!(NbtTag::String("7".into()).as_i64(), None);
        assert_eq!(NbtTag::List(vec![]).as_f64(), None);
    }

    #[test]
    fn i32_view_truncates_integers_and_saturates_floats() {
        assert_eq!(NbtTag::Long((1 << 32) + 7).as_i32(), Some(7));
        assert_eq!(NbtTag::Long(-1).as_i32(), Some(-1));
        assert_eq!(NbtTag::Double(1e10).as_i32(), Some(i32::MAX));
        assert_eq!(NbtTag::Double(-1e10).as_i32(), Some(i32::MIN));
        assert_eq!(NbtTag::Float(-0.5).as_i32(), Some(-1));
        assert_eq!(NbtTag::Double(f64::NAN).as_i32(), Some(0));
        assert_eq!(NbtTag::String("1".into()).as_i32(), None);
    }

    #[test]
    fn type_ids_cover_all_payload_tags() {
        let tags = [
            NbtTag::Byte(0),
            NbtTag::Short(0),
            NbtTag::Int(0),
            NbtTag::Long(0),
            NbtTag::Float(0.0),
            NbtTag::Double(0.0),
            NbtTag::ByteArray(vec![]),
            NbtTag::String(String::new()),
            NbtTag::List(vec![]),
            NbtTag::Compound(NbtCompound::new()),
            NbtTag::IntArray(vec![]),
            NbtTag::LongArray(vec![]),
        ];
        for (i, tag) in tags.iter().enumerate() {
            assert_eq!(tag.type_id() as usize, i + 1);
        }
    }
}
