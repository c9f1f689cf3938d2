//! Host-stack plumbing and shadow interface lifecycle
//!
//! This crate holds the in-memory interface registry (with its global
//! mutation lock and journal), the receive-tap contract, the ARP
//! classifier, the link statistics register, the transport provider
//! seam, and [`ShadowInterface`] itself: attach, open/close, transmit
//! redirection, detach.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use shadownet_core::{LinkType, MacAddr};
//! use shadownet_stack::{
//!     InterfaceRegistry, LinkStats, NetInterface, RecordingTransport, ShadowConfig,
//!     ShadowInterface,
//! };
//!
//! # fn main() -> shadownet_core::Result<()> {
//! let registry = Arc::new(InterfaceRegistry::new());
//! registry.register(NetInterface::new(
//!     "eth0",
//!     MacAddr([0, 1, 2, 3, 4, 5]),
//!     MacAddr::broadcast(),
//!     LinkType::Ethernet,
//! ))?;
//!
//! let transport = Arc::new(RecordingTransport::new());
//! let shadow = ShadowInterface::attach(
//!     registry,
//!     &ShadowConfig::default(),
//!     LinkStats::new(),
//!     transport,
//! )?;
//! assert_eq!(shadow.name(), "virt0");
//! shadow.detach();
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod host;
pub mod registry;
pub mod shadow;
pub mod stats;
pub mod tap;
pub mod transport;

// Re-export main types
pub use classifier::ArpClassifier;
pub use host::{
    get_host_interface, list_host_interfaces, mirror_host_interface, HostInterfaceInfo,
};
pub use registry::{InterfaceRegistry, NetInterface, RegistryEvent, TxHandler};
pub use shadow::{ShadowConfig, ShadowInterface};
pub use stats::{LinkStats, StatsSnapshot};
pub use tap::{Continue, FrameObserver};
pub use transport::{DatalinkTransport, RecordingTransport, Transport};
