//! The capability contract every version adapter implements.
//!
//! Callers never name a host revision: they get a `dyn CapabilityAdapter`
//! from the [`Bridge`](crate::Bridge) and use the operations below, which
//! behave the same on every supported host.

use mc_bridge_proto::{PacketKind, PacketPayload, VersionIdentifier};

use crate::error::BridgeError;
use crate::host::{ItemStack, PeerHandle};

// ─── Tag values ──────────────────────────────────────────────────────────────

/// A value stored under a custom item tag key.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    String(String),
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
}

/// The type a tag is read back as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    String,
    Boolean,
    Int,
    Long,
    Double,
}

impl TagKind {
    /// What reading an absent key returns.
    pub fn zero(self) -> TagValue {
        match self {
            TagKind::String => TagValue::String(String::new()),
            TagKind::Boolean => TagValue::Boolean(false),
            TagKind::Int => TagValue::Int(0),
            TagKind::Long => TagValue::Long(0),
            TagKind::Double => TagValue::Double(0.0),
        }
    }
}

impl TagValue {
    pub fn kind(&self) -> TagKind {
        match self {
            TagValue::String(_) => TagKind::String,
            TagValue::Boolean(_) => TagKind::Boolean,
            TagValue::Int(_) => TagKind::Int,
            TagValue::Long(_) => TagKind::Long,
            TagValue::Double(_) => TagKind::Double,
        }
    }
}

impl From<&str> for TagValue {
    fn from(v: &str) -> Self {
        TagValue::String(v.to_owned())
    }
}

impl From<String> for TagValue {
    fn from(v: String) -> Self {
        TagValue::String(v)
    }
}

impl From<bool> for TagValue {
    fn from(v: bool) -> Self {
        TagValue::Boolean(v)
    }
}

impl From<i32> for TagValue {
    fn from(v: i32) -> Self {
        TagValue::Int(v)
    }
}

impl From<i64> for TagValue {
    fn from(v: i64) -> Self {
        TagValue::Long(v)
    }
}

impl From<f64> for TagValue {
    fn from(v: f64) -> Self {
        TagValue::Double(v)
    }
}

// ─── Item tag session ────────────────────────────────────────────────────────

/// Custom-tag view over one item, opened by [`CapabilityAdapter::open_item`].
///
/// Mutations may stay buffered inside the session. [`TagItem::to_native_handle`]
/// returns the item with every mutation made so far applied. A mutation the
/// host could not store is rejected by the setter, never by the write-back.
pub trait TagItem: Send {
    /// Insert or replace `key`. A different type replaces the old entry.
    /// Keys and string values the host cannot store fail with
    /// [`BridgeError::TagTooLong`].
    fn set_tag(&mut self, key: &str, value: TagValue) -> Result<(), BridgeError>;

    /// The stored value coerced to `kind`, or `kind.zero()` when absent.
    /// Use [`TagItem::has_tag`] when a stored zero must be told apart from a
    /// missing key.
    fn get_tag(&self, key: &str, kind: TagKind) -> TagValue;

    fn has_tag(&self, key: &str) -> bool;

    /// No-op when absent.
    fn remove_tag(&mut self, key: &str);

    fn to_native_handle(&self) -> Result<ItemStack, BridgeError>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.set_tag(key, value.into())
    }

    fn set_boolean(&mut self, key: &str, value: bool) -> Result<(), BridgeError> {
        self.set_tag(key, value.into())
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<(), BridgeError> {
        self.set_tag(key, value.into())
    }

    fn set_long(&mut self, key: &str, value: i64) -> Result<(), BridgeError> {
        self.set_tag(key, value.into())
    }

    fn set_double(&mut self, key: &str, value: f64) -> Result<(), BridgeError> {
        self.set_tag(key, value.into())
    }

    fn get_string(&self, key: &str) -> String {
        match self.get_tag(key, TagKind::String) {
            TagValue::String(v) => v,
            _ => String::new(),
        }
    }

    fn get_boolean(&self, key: &str) -> bool {
        matches!(self.get_tag(key, TagKind::Boolean), TagValue::Boolean(true))
    }

    fn get_int(&self, key: &str) -> i32 {
        match self.get_tag(key, TagKind::Int) {
            TagValue::Int(v) => v,
            _ => 0,
        }
    }

    fn get_long(&self, key: &str) -> i64 {
        match self.get_tag(key, TagKind::Long) {
            TagValue::Long(v) => v,
            _ => 0,
        }
    }

    fn get_double(&self, key: &str) -> f64 {
        match self.get_tag(key, TagKind::Double) {
            TagValue::Double(v) => v,
            _ => 0.0,
        }
    }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// One host revision's implementation of the bridge capabilities.
pub trait CapabilityAdapter: Send + Sync {
    /// Short label used in logs and errors, e.g. `v1_18_R1`.
    fn name(&self) -> &'static str;

    /// The protocol a [`PacketPayload`] must be built for to be accepted.
    fn protocol(&self) -> &VersionIdentifier;

    /// Wire id of `kind` on this revision, if the revision has that packet.
    fn packet_id(&self, kind: PacketKind) -> Option<i32>;

    /// Decode the item's host tag data into a tag session.
    fn open_item(&self, item: ItemStack) -> Result<Box<dyn TagItem>, BridgeError>;

    /// Validate `payload` against this revision and queue it on `peer`.
    /// A rejected payload is never written.
    fn send_packet(&self, peer: &PeerHandle, payload: &PacketPayload) -> Result<(), BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert_eq!(TagKind::String.zero(), TagValue::String(String::new()));
        assert_eq!(TagKind::Boolean.zero(), TagValue::Boolean(false));
        assert_eq!(TagKind::Int.zero(), TagValue::Int(0));
        assert_eq!(TagKind::Long.zero(), TagValue::Long(0));
        assert_eq!(TagKind::Double.zero(), TagValue::Double(0.0));
    }

    #[test]
    fn conversions_pick_the_matching_kind() {
        assert_eq!(TagValue::from(5).kind(), TagKind::Int);
        assert_eq!(TagValue::from(5_i64).kind(), TagKind::Long);
        assert_eq!(TagValue::from(0.5).kind(), TagKind::Double);
        assert_eq!(TagValue::from("x").kind(), TagKind::String);
        assert_eq!(TagValue::from(true).kind(), TagKind::Boolean);
    }
}
