//! Ethernet II frame construction and parsing

use bytes::{BufMut, BytesMut};
use shadownet_core::MacAddr;

/// Ethernet II frame
#[derive(Debug, Clone)]
pub struct EthernetFrame {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType field
    pub ethertype: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl EthernetFrame {
    /// Minimum Ethernet frame size (without FCS)
    pub const MIN_FRAME_SIZE: usize = 60;

    /// Ethernet header size (dst + src + type)
    pub const HEADER_SIZE: usize = 14;

    /// Create a new Ethernet frame
    pub fn new(destination: MacAddr, source: MacAddr, ethertype: u16, payload: Vec<u8>) -> Self {
        EthernetFrame {
            destination,
            source,
            ethertype,
            payload,
        }
    }

    /// Convert the frame to bytes, padding to the minimum frame size
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());

        buffer.put_slice(self.destination.as_bytes());
        buffer.put_slice(self.source.as_bytes());
        buffer.put_u16(self.ethertype);
        buffer.put_slice(&self.payload);

        let mut result = buffer.to_vec();
        if result.len() < Self::MIN_FRAME_SIZE {
            result.resize(Self::MIN_FRAME_SIZE, 0);
        }

        result
    }

    /// Parse an Ethernet frame from bytes
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::HEADER_SIZE {
            return None;
        }

        let destination = MacAddr::from_slice(&data[0..6])?;
        let source = MacAddr::from_slice(&data[6..12])?;
        let ethertype = u16::from_be_bytes([data[12], data[13]]);
        let payload = data[Self::HEADER_SIZE..].to_vec();

        Some(EthernetFrame {
            destination,
            source,
            ethertype,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_pads_to_minimum() {
        let src = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let dst = MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);

        let frame = EthernetFrame::new(dst, src, 0x0800, vec![0x01, 0x02]);
        let bytes = frame.to_bytes();

        assert_eq!(bytes.len(), EthernetFrame::MIN_FRAME_SIZE);
        assert_eq!(&bytes[0..6], dst.as_bytes());
        assert_eq!(&bytes[6..12], src.as_bytes());
        assert_eq!(u16::from_be_bytes([bytes[12], bytes[13]]), 0x0800);
    }

    #[test]
    fn test_from_bytes() {
        let data = vec![
            0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, // dst
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x08, 0x06, // ARP
            0x01, 0x02, 0x03, 0x04, // payload
        ];

        let frame = EthernetFrame::from_bytes(&data).unwrap();
        assert_eq!(frame.destination.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(frame.ethertype, 0x0806);
        assert_eq!(frame.payload, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_from_bytes_truncated() {
        assert!(EthernetFrame::from_bytes(&[0x00; 10]).is_none());
    }
}
