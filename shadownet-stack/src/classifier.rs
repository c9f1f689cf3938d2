//! Receive-path frame classifier
//!
//! Inspects every inbound frame on the tapped interface. ARP frames are
//! parsed at their fixed offsets and logged; everything else passes
//! through unexamined. Receive counters are bumped per ARP frame only,
//! while the transmit path counts every frame; the asymmetry is kept
//! deliberately (see DESIGN.md).

use crate::stats::LinkStats;
use crate::tap::{Continue, FrameObserver};
use shadownet_core::Frame;
use shadownet_packet::{ArpOpcode, ArpPacket, ETHERTYPE_ARP};
use tracing::debug;

/// Classifier installed as the receive tap on the underlying interface
pub struct ArpClassifier {
    stats: LinkStats,
}

impl ArpClassifier {
    /// Create a classifier feeding the given counter set
    pub fn new(stats: LinkStats) -> Self {
        Self { stats }
    }
}

impl FrameObserver for ArpClassifier {
    fn observe(&self, frame: &Frame) -> Continue {
        if frame.ethertype() != Some(ETHERTYPE_ARP) {
            return Continue;
        }

        // Classification is best-effort: a header that does not parse is
        // left unclassified, never an error.
        if let Ok(arp) = ArpPacket::parse(frame.network_payload()) {
            match arp.operation {
                ArpOpcode::Request => debug!(
                    "ARP request: {} ({}) asks for {} ({})",
                    arp.sender_hw_addr,
                    arp.sender_proto_addr,
                    arp.target_hw_addr,
                    arp.target_proto_addr,
                ),
                ArpOpcode::Reply => debug!(
                    "ARP reply: {} ({}) answers {} ({})",
                    arp.sender_hw_addr,
                    arp.sender_proto_addr,
                    arp.target_hw_addr,
                    arp.target_proto_addr,
                ),
            }
        }

        self.stats.record_rx(frame.len());
        Continue
    }
}
