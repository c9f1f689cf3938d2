//! ARP packet structure and parsing
//!
//! The classifier only ever reads ARP headers off the wire, but the
//! packet type round-trips so tests and the transmit path can build
//! frames too. The layout is the fixed 28-byte Ethernet/IPv4 form
//! (hardware length 6, protocol length 4).

use bytes::{BufMut, BytesMut};
use shadownet_core::{Error, MacAddr, Result};
use std::net::Ipv4Addr;

/// ARP EtherType
pub const ETHERTYPE_ARP: u16 = 0x0806;

/// Hardware type for Ethernet
pub const HTYPE_ETHERNET: u16 = 1;

/// Protocol type for IPv4
pub const PTYPE_IPV4: u16 = 0x0800;

/// Size of the fixed Ethernet/IPv4 ARP header
pub const ARP_PACKET_LEN: usize = 28;

/// ARP Operation Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArpOpcode {
    /// ARP Request
    Request = 1,
    /// ARP Reply
    Reply = 2,
}

impl ArpOpcode {
    pub fn from_u16(val: u16) -> Option<Self> {
        match val {
            1 => Some(Self::Request),
            2 => Some(Self::Reply),
            _ => None,
        }
    }
}

/// ARP Packet
#[derive(Debug, Clone)]
pub struct ArpPacket {
    /// Hardware type (typically 1 for Ethernet)
    pub htype: u16,
    /// Protocol type (typically 0x0800 for IPv4)
    pub ptype: u16,
    /// Hardware address length (6 for MAC)
    pub hlen: u8,
    /// Protocol address length (4 for IPv4)
    pub plen: u8,
    /// Operation
    pub operation: ArpOpcode,
    /// Sender hardware address (MAC)
    pub sender_hw_addr: MacAddr,
    /// Sender protocol address (IP)
    pub sender_proto_addr: Ipv4Addr,
    /// Target hardware address (MAC)
    pub target_hw_addr: MacAddr,
    /// Target protocol address (IP)
    pub target_proto_addr: Ipv4Addr,
}

impl ArpPacket {
    /// Create new ARP request
    pub fn new_request(sender_mac: MacAddr, sender_ip: Ipv4Addr, target_ip: Ipv4Addr) -> Self {
        Self {
            htype: HTYPE_ETHERNET,
            ptype: PTYPE_IPV4,
            hlen: 6,
            plen: 4,
            operation: ArpOpcode::Request,
            sender_hw_addr: sender_mac,
            sender_proto_addr: sender_ip,
            target_hw_addr: MacAddr::zero(), // Unknown in request
            target_proto_addr: target_ip,
        }
    }

    /// Create new ARP reply
    pub fn new_reply(
        sender_mac: MacAddr,
        sender_ip: Ipv4Addr,
        target_mac: MacAddr,
        target_ip: Ipv4Addr,
    ) -> Self {
        Self {
            htype: HTYPE_ETHERNET,
            ptype: PTYPE_IPV4,
            hlen: 6,
            plen: 4,
            operation: ArpOpcode::Reply,
            sender_hw_addr: sender_mac,
            sender_proto_addr: sender_ip,
            target_hw_addr: target_mac,
            target_proto_addr: target_ip,
        }
    }

    /// Parse an ARP packet from bytes at the fixed Ethernet/IPv4 offsets
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < ARP_PACKET_LEN {
            return Err(Error::datalink("ARP packet too short"));
        }

        let htype = u16::from_be_bytes([data[0], data[1]]);
        let ptype = u16::from_be_bytes([data[2], data[3]]);
        let hlen = data[4];
        let plen = data[5];
        let op_val = u16::from_be_bytes([data[6], data[7]]);

        let operation =
            ArpOpcode::from_u16(op_val).ok_or_else(|| Error::datalink("Invalid ARP opcode"))?;

        let mut sender_hw = [0u8; 6];
        sender_hw.copy_from_slice(&data[8..14]);
        let sender_proto_addr = Ipv4Addr::new(data[14], data[15], data[16], data[17]);

        let mut target_hw = [0u8; 6];
        target_hw.copy_from_slice(&data[18..24]);
        let target_proto_addr = Ipv4Addr::new(data[24], data[25], data[26], data[27]);

        Ok(Self {
            htype,
            ptype,
            hlen,
            plen,
            operation,
            sender_hw_addr: MacAddr(sender_hw),
            sender_proto_addr,
            target_hw_addr: MacAddr(target_hw),
            target_proto_addr,
        })
    }

    /// Serialize ARP packet to bytes
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(ARP_PACKET_LEN);

        buf.put_u16(self.htype);
        buf.put_u16(self.ptype);
        buf.put_u8(self.hlen);
        buf.put_u8(self.plen);
        buf.put_u16(self.operation as u16);
        buf.put_slice(self.sender_hw_addr.as_bytes());
        buf.put_slice(&self.sender_proto_addr.octets());
        buf.put_slice(self.target_hw_addr.as_bytes());
        buf.put_slice(&self.target_proto_addr.octets());

        buf.to_vec()
    }

    /// Check if this is a request
    pub fn is_request(&self) -> bool {
        self.operation == ArpOpcode::Request
    }

    /// Check if this is a reply
    pub fn is_reply(&self) -> bool {
        self.operation == ArpOpcode::Reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arp_request_creation() {
        let sender_mac = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        let sender_ip = Ipv4Addr::new(192, 168, 1, 1);
        let target_ip = Ipv4Addr::new(192, 168, 1, 2);

        let packet = ArpPacket::new_request(sender_mac, sender_ip, target_ip);

        assert_eq!(packet.operation, ArpOpcode::Request);
        assert_eq!(packet.sender_hw_addr, sender_mac);
        assert_eq!(packet.target_hw_addr, MacAddr::zero());
        assert!(packet.is_request());
    }

    #[test]
    fn test_arp_serialize_parse() {
        let sender_mac = MacAddr([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        let target_mac = MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        let sender_ip = Ipv4Addr::new(10, 0, 0, 1);
        let target_ip = Ipv4Addr::new(10, 0, 0, 2);

        let packet = ArpPacket::new_reply(sender_mac, sender_ip, target_mac, target_ip);
        let bytes = packet.serialize();

        assert_eq!(bytes.len(), ARP_PACKET_LEN);

        let parsed = ArpPacket::parse(&bytes).unwrap();
        assert!(parsed.is_reply());
        assert_eq!(parsed.sender_hw_addr, sender_mac);
        assert_eq!(parsed.sender_proto_addr, sender_ip);
        assert_eq!(parsed.target_hw_addr, target_mac);
        assert_eq!(parsed.target_proto_addr, target_ip);
    }

    #[test]
    fn test_arp_parse_too_short() {
        assert!(ArpPacket::parse(&[0u8; 27]).is_err());
    }

    #[test]
    fn test_arp_parse_bad_opcode() {
        let packet = ArpPacket::new_request(
            MacAddr::zero(),
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
        );
        let mut bytes = packet.serialize();
        bytes[6] = 0xff;
        bytes[7] = 0xff;

        assert!(ArpPacket::parse(&bytes).is_err());
    }
}
