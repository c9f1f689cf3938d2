//! Shadownet Core Library
//!
//! This crate provides the fundamental types and error handling for
//! shadownet, a virtual interface that shadows an existing network
//! interface: it observes the underlying receive path and relays
//! transmitted frames back onto the underlying link.

pub mod error;
pub mod frame;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use frame::{Frame, FrameMeta};
pub use types::{LinkType, MacAddr};
