//! SetTime: synchronizes the world clock shown to one client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::packets::{Packet, PacketKind};

/// SetTime packet. Both clocks are in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetTime {
    /// Total ticks the world has existed. Not affected by `/time set`.
    pub world_age: i64,
    /// Day/night position, wrapping at 24000. A negative value freezes the
    /// client's sun at the absolute value.
    pub time_of_day: i64,
}

impl SetTime {
    pub fn new(world_age: i64, time_of_day: i64) -> Self {
        Self {
            world_age,
            time_of_day,
        }
    }
}

impl Packet for SetTime {
    const KIND: PacketKind = PacketKind::SetTime;
}

impl ProtoEncode for SetTime {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i64(self.world_age);
        buf.put_i64(self.time_of_day);
    }
}
