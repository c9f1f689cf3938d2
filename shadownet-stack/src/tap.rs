//! Receive tap contract
//!
//! A tap observes every inbound frame on the interface it is installed
//! on. The only verdict it can return is [`Continue`], so a tap is an
//! observer by construction: it has no way to consume, drop, or divert
//! the frame.

use shadownet_core::Frame;

/// Disposition returned by a receive tap: hand the frame back to normal
/// processing. This is the only constructible value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Continue;

/// A receive-path observer installed on an interface
///
/// Called on the receive thread of the tapped interface; must not block.
/// The host serializes receive processing per interface, so `observe` is
/// never invoked concurrently for the same interface.
pub trait FrameObserver: Send + Sync {
    /// Inspect one inbound frame
    fn observe(&self, frame: &Frame) -> Continue;
}
