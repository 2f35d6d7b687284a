//! Adapter for CraftBukkit revision `v1_18_R1` (Java protocol `1.18`).
//!
//! Items keep their custom tags in the `tag` compound of the item's NBT root,
//! stored in the host's big-endian layout. Booleans are stored as bytes.
//! Packets are framed with this revision's play-state ids.

use mc_bridge_nbt::{mutf8, NbtCompound, NbtRoot, NbtTag, MAX_STRING_LEN};
use mc_bridge_proto::codec::frame_packet;
use mc_bridge_proto::{PacketKind, PacketPayload, VersionIdentifier};
use tracing::{debug, trace};

use crate::adapter::{CapabilityAdapter, TagItem, TagKind, TagValue};
use crate::error::BridgeError;
use crate::host::{ItemStack, PeerHandle};

/// Identifiers this adapter is registered under.
pub const VERSIONS: &[&str] = &["1.18", "v1_18_R1"];

static PROTOCOL: VersionIdentifier = VersionIdentifier::from_static("1.18");

/// Compound holding custom tags inside the item root.
const TAG_COMPOUND: &str = "tag";

#[derive(Debug, Default, Clone, Copy)]
pub struct V1_18R1;

impl CapabilityAdapter for V1_18R1 {
    fn name(&self) -> &'static str {
        "v1_18_R1"
    }

    fn protocol(&self) -> &VersionIdentifier {
        &PROTOCOL
    }

    fn packet_id(&self, kind: PacketKind) -> Option<i32> {
        match kind {
            PacketKind::Disconnect => Some(0x1A),
            PacketKind::SetTime => Some(0x59),
            PacketKind::SetTitle => Some(0x5A),
            // server transfer does not exist on this revision
            PacketKind::Transfer => None,
        }
    }

    fn open_item(&self, item: ItemStack) -> Result<Box<dyn TagItem>, BridgeError> {
        let root = if item.nbt().is_empty() {
            NbtRoot::default()
        } else {
            mc_bridge_nbt::from_bytes(item.nbt())?
        };
        Ok(Box::new(ItemTags { item, root }))
    }

    fn send_packet(&self, peer: &PeerHandle, payload: &PacketPayload) -> Result<(), BridgeError> {
        let id = if payload.protocol == PROTOCOL {
            self.packet_id(payload.kind)
        } else {
            None
        };
        let Some(id) = id else {
            return Err(BridgeError::IncompatiblePacketType {
                adapter: self.name(),
                kind: payload.kind,
                protocol: payload.protocol.clone(),
            });
        };
        debug!(
            "Sending {} (0x{id:02X}, {} bytes) to {}",
            payload.kind,
            payload.body.len(),
            peer.name()
        );
        peer.send_frame(frame_packet(id, &payload.body))
    }
}

// ─── Item tags ───────────────────────────────────────────────────────────────

/// Decoded copy of an item's NBT. Mutations stay here until
/// [`TagItem::to_native_handle`] re-encodes them.
struct ItemTags {
    item: ItemStack,
    root: NbtRoot,
}

impl ItemTags {
    fn tags(&self) -> Option<&NbtCompound> {
        self.root
            .compound
            .get(TAG_COMPOUND)
            .and_then(NbtTag::as_compound)
    }

    fn tags_mut(&mut self) -> &mut NbtCompound {
        let slot = self
            .root
            .compound
            .entry(TAG_COMPOUND.to_owned())
            .or_insert_with(|| NbtTag::Compound(NbtCompound::new()));
        if slot.as_compound().is_none() {
            *slot = NbtTag::Compound(NbtCompound::new());
        }
        match slot {
            NbtTag::Compound(tags) => tags,
            _ => unreachable!("slot was just made a compound"),
        }
    }
}

/// Rejects a key or string value whose encoded form exceeds the host's
/// string limit.
fn check_len(key: &str, text: &str) -> Result<(), BridgeError> {
    let len = mutf8::encoded_len(text);
    if len > MAX_STRING_LEN {
        return Err(BridgeError::TagTooLong {
            key: key.chars().take(32).collect(),
            len,
            limit: MAX_STRING_LEN,
        });
    }
    Ok(())
}

fn to_nbt(value: TagValue) -> NbtTag {
    match value {
        TagValue::String(v) => NbtTag::String(v),
        TagValue::Boolean(v) => NbtTag::Byte(v as i8),
        TagValue::Int(v) => NbtTag::Int(v),
        TagValue::Long(v) => NbtTag::Long(v),
        TagValue::Double(v) => NbtTag::Double(v),
    }
}

/// Host read semantics: integer tags narrow by truncation, floating tags
/// floor and saturate, a boolean is the low byte of the int view being
/// non-zero, and a kind mismatch across string/number reads as zero.
fn coerce(tag: &NbtTag, kind: TagKind) -> TagValue {
    let value = match kind {
        TagKind::String => tag.as_str().map(|s| TagValue::String(s.to_owned())),
        TagKind::Boolean => tag.as_i32().map(|v| TagValue::Boolean(v as i8 != 0)),
        TagKind::Int => tag.as_i32().map(TagValue::Int),
        TagKind::Long => tag.as_i64().map(TagValue::Long),
        TagKind::Double => tag.as_f64().map(TagValue::Double),
    };
    value.unwrap_or_else(|| kind.zero())
}

impl TagItem for ItemTags {
    fn set_tag(&mut self, key: &str, value: TagValue) -> Result<(), BridgeError> {
        if key.is_empty() {
            return Err(BridgeError::InvalidKey);
        }
        check_len(key, key)?;
        if let TagValue::String(text) = &value {
            check_len(key, text)?;
        }
        trace!("Setting tag {key} on {}", self.item.material());
        self.tags_mut().insert(key.to_owned(), to_nbt(value));
        Ok(())
    }

    fn get_tag(&self, key: &str, kind: TagKind) -> TagValue {
        self.tags()
            .and_then(|tags| tags.get(key))
            .map_or_else(|| kind.zero(), |tag| coerce(tag, kind))
    }

    fn has_tag(&self, key: &str) -> bool {
        self.tags().is_some_and(|tags| tags.contains_key(key))
    }

    fn remove_tag(&mut self, key: &str) {
        let Some(NbtTag::Compound(tags)) = self.root.compound.get_mut(TAG_COMPOUND) else {
            return;
        };
        if tags.remove(key).is_some() {
            trace!("Removed tag {key} from {}", self.item.material());
        }
    }

    fn to_native_handle(&self) -> Result<ItemStack, BridgeError> {
        let mut root = self.root.clone();
        // the host drops an empty tag compound rather than storing it
        if root
            .compound
            .get(TAG_COMPOUND)
            .and_then(NbtTag::as_compound)
            .is_some_and(NbtCompound::is_empty)
        {
            root.compound.remove(TAG_COMPOUND);
        }
        let blob = if root.compound.is_empty() && root.name.is_empty() {
            bytes::Bytes::new()
        } else {
            mc_bridge_nbt::to_bytes(&root)?
        };
        Ok(self.item.with_nbt(blob))
    }
}
