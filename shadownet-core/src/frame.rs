//! Link-layer frame model
//!
//! A [`Frame`] pairs an immutable payload view with mutable routing
//! metadata. The transmit path re-targets a frame by rewriting the
//! metadata only; the frame bytes themselves can never be altered
//! through this API, so re-targeting is copy-free.

use crate::types::MacAddr;
use bytes::Bytes;

/// Length of an Ethernet II header (dst + src + ethertype)
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Routing metadata attached to a frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameMeta {
    /// Name of the interface the frame is destined for
    pub device: Option<String>,
    /// Queueing priority
    pub priority: u8,
}

/// A unit of link-layer data: immutable bytes plus mutable routing
/// metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Bytes,
    /// Mutable routing metadata (target device, priority)
    pub meta: FrameMeta,
}

impl Frame {
    /// Create a frame from raw Ethernet II bytes
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            meta: FrameMeta::default(),
        }
    }

    /// Total frame length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the frame is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw frame bytes, including the Ethernet header
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// EtherType field, if the frame carries a complete Ethernet header
    pub fn ethertype(&self) -> Option<u16> {
        if self.data.len() < ETHERNET_HEADER_LEN {
            return None;
        }
        Some(u16::from_be_bytes([self.data[12], self.data[13]]))
    }

    /// Destination MAC address, if the header is complete
    pub fn destination(&self) -> Option<MacAddr> {
        MacAddr::from_slice(self.data.get(0..6)?)
    }

    /// Source MAC address, if the header is complete
    pub fn source(&self) -> Option<MacAddr> {
        MacAddr::from_slice(self.data.get(6..12)?)
    }

    /// Bytes past the Ethernet header (the network-layer header)
    pub fn network_payload(&self) -> &[u8] {
        if self.data.len() < ETHERNET_HEADER_LEN {
            return &[];
        }
        &self.data[ETHERNET_HEADER_LEN..]
    }
}
