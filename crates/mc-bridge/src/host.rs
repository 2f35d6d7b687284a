//! Handles on host-native objects that callers pass through the bridge.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::error::BridgeError;

// ─── Items ───────────────────────────────────────────────────────────────────

/// A host item stack as the host stores it.
///
/// `nbt` is the host's serialized tag blob; its layout belongs to the running
/// host revision and is only interpreted by a version adapter. An empty blob
/// means the item carries no tag data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    material: String,
    amount: u8,
    nbt: Bytes,
}

impl ItemStack {
    pub fn new(material: impl Into<String>, amount: u8) -> Self {
        Self::from_raw(material, amount, Bytes::new())
    }

    pub fn from_raw(material: impl Into<String>, amount: u8, nbt: Bytes) -> Self {
        Self {
            material: material.into(),
            amount,
            nbt,
        }
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn amount(&self) -> u8 {
        self.amount
    }

    pub fn nbt(&self) -> &Bytes {
        &self.nbt
    }

    /// Same item with a replaced tag blob.
    pub(crate) fn with_nbt(&self, nbt: Bytes) -> Self {
        Self {
            material: self.material.clone(),
            amount: self.amount,
            nbt,
        }
    }
}

// ─── Peers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("connection closed")]
pub struct ConnectionClosed;

/// The live transport behind a connected peer.
pub trait PeerConnection: Send + Sync {
    /// Queue one framed packet. Must not wait for the peer.
    fn send(&self, frame: Bytes) -> Result<(), ConnectionClosed>;
}

/// Connection backed by an unbounded channel drained by the host's writer task.
pub struct ChannelConnection {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl ChannelConnection {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PeerConnection for ChannelConnection {
    fn send(&self, frame: Bytes) -> Result<(), ConnectionClosed> {
        self.tx.send(frame).map_err(|_| ConnectionClosed)
    }
}

/// A connected player session. Cloning shares the same connection.
#[derive(Clone)]
pub struct PeerHandle {
    name: String,
    connection: Arc<dyn PeerConnection>,
}

impl PeerHandle {
    pub fn new(name: impl Into<String>, connection: Arc<dyn PeerConnection>) -> Self {
        Self {
            name: name.into(),
            connection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn send_frame(&self, frame: Bytes) -> Result<(), BridgeError> {
        self.connection
            .send(frame)
            .map_err(|_| BridgeError::PeerDisconnected(self.name.clone()))
    }
}

impl fmt::Debug for PeerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerHandle").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_connection_delivers_in_order() {
        let (conn, mut rx) = ChannelConnection::new();
        let peer = PeerHandle::new("Alex", Arc::new(conn));
        peer.send_frame(Bytes::from_static(b"a")).unwrap();
        peer.send_frame(Bytes::from_static(b"b")).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Bytes::from_static(b"a"));
        assert_eq!(rx.try_recv().unwrap(), Bytes::from_static(b"b"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_reports_peer() {
        let (conn, rx) = ChannelConnection::new();
        drop(rx);
        let peer = PeerHandle::new("Alex", Arc::new(conn));
        match peer.send_frame(Bytes::new()) {
            Err(BridgeError::PeerDisconnected(name)) => assert_eq!(name, "Alex"),
            other => panic!("expected PeerDisconnected, got {other:?}"),
        }
    }

    #[test]
    fn new_item_has_no_tag_data() {
        let item = ItemStack::new("minecraft:stone", 64);
        assert!(item.nbt().is_empty());
        assert_eq!(item.material(), "minecraft:stone");
        assert_eq!(item.amount(), 64);
    }
}
