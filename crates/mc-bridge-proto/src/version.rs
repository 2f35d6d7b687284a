//! Host runtime revision identifiers.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtoError;

/// Comparable token naming a host runtime revision, e.g. `1.18` or `v1_18_R1`.
///
/// Equality is exact on the token text. Ordering walks the digit and letter
/// runs of both tokens, comparing digit runs numerically, so `1.9 < 1.18`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionIdentifier(Cow<'static, str>);

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Number(u64),
    Word(&'a str),
}

impl VersionIdentifier {
    pub fn new(raw: impl Into<String>) -> Result<Self, ProtoError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ProtoError::InvalidVersion(raw));
        }
        Ok(Self(Cow::Owned(trimmed.to_owned())))
    }

    /// Identifier from a literal, checked at compile time when used in a
    /// `const` or `static`. The literal must be non-empty printable ASCII.
    pub const fn from_static(raw: &'static str) -> Self {
        let bytes = raw.as_bytes();
        assert!(!bytes.is_empty(), "empty version identifier");
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                bytes[i].is_ascii_graphic(),
                "version identifier must be printable ASCII"
            );
            i += 1;
        }
        Self(Cow::Borrowed(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segments(&self) -> Vec<Segment<'_>> {
        let s: &str = &self.0;
        let mut out = Vec::new();
        // (start, is_digit_run)
        let mut run: Option<(usize, bool)> = None;
        for (i, c) in s.char_indices() {
            let kind = if c.is_ascii_digit() {
                Some(true)
            } else if c.is_alphabetic() {
                Some(false)
            } else {
                None
            };
            if let Some((start, numeric)) = run {
                if kind == Some(numeric) {
                    continue;
                }
                out.push(Self::segment(&s[start..i], numeric));
            }
            run = kind.map(|k| (i, k));
        }
        if let Some((start, numeric)) = run {
            out.push(Self::segment(&s[start..], numeric));
        }
        out
    }

    fn segment(run: &str, numeric: bool) -> Segment<'_> {
        if numeric {
            // Digit runs longer than u64 fall back to text comparison.
            run.parse().map(Segment::Number).unwrap_or(Segment::Word(run))
        } else {
            Segment::Word(run)
        }
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments()
            .cmp(&other.segments())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for VersionIdentifier {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VersionIdentifier {
    type Error = ProtoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VersionIdentifier {
    type Error = ProtoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionIdentifier> for String {
    fn from(v: VersionIdentifier) -> Self {
        v.0.into_owned()
    }
}

impl fmt::Debug for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionIdentifier({})", self.0)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
