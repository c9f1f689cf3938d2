//! Frame parsing for shadownet
//!
//! The shadow interface only observes traffic, so this crate is
//! parsing-first: an Ethernet II frame layout and the fixed-offset ARP
//! header the receive-path classifier inspects. Builders exist for the
//! transmit path and tests.

pub mod arp;
pub mod ethernet;

pub use arp::{ArpOpcode, ArpPacket, ETHERTYPE_ARP};
pub use ethernet::EthernetFrame;
