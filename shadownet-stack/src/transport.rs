//! Transport provider seam
//!
//! The shadow interface never sends frames itself; it hands re-targeted
//! frames to a [`Transport`]. Transmission is fire-and-forget: no
//! completion signal is consumed, failures are logged and dropped.

use parking_lot::Mutex;
use pnet_datalink::{Channel, DataLinkSender};
use shadownet_core::{Error, Frame, Result};
use tracing::{info, warn};

/// Submit-for-transmission seam
pub trait Transport: Send + Sync {
    /// Submit one frame for transmission on the interface named in its
    /// routing metadata
    fn submit(&self, frame: Frame);
}

/// Transport backed by a raw datalink channel on a host interface
pub struct DatalinkTransport {
    interface: String,
    sender: Mutex<Box<dyn DataLinkSender>>,
}

impl DatalinkTransport {
    /// Open a persistent raw sender on the named host interface
    pub fn open(name: &str) -> Result<Self> {
        let interface = pnet_datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == name)
            .ok_or_else(|| Error::NoSuchInterface(name.to_string()))?;

        let (tx, _) = match pnet_datalink::channel(&interface, Default::default()) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => return Err(Error::datalink("unsupported channel type")),
            Err(e) => return Err(Error::datalink(format!("failed to open channel: {}", e))),
        };

        info!("opened datalink transport on {}", name);
        Ok(Self {
            interface: name.to_string(),
            sender: Mutex::new(tx),
        })
    }
}

impl Transport for DatalinkTransport {
    fn submit(&self, frame: Frame) {
        let mut sender = self.sender.lock();
        match sender.send_to(frame.data(), None) {
            Some(Ok(())) => {}
            Some(Err(e)) => warn!("{}: send failed: {}", self.interface, e),
            None => warn!("{}: send not attempted", self.interface),
        }
    }
}

/// Transport fake that records every submission, for tests
#[derive(Default)]
pub struct RecordingTransport {
    submissions: Mutex<Vec<Frame>>,
}

impl RecordingTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames submitted so far, in order
    pub fn submissions(&self) -> Vec<Frame> {
        self.submissions.lock().clone()
    }

    /// Number of frames submitted so far
    pub fn len(&self) -> usize {
        self.submissions.lock().len()
    }

    /// Check if nothing was submitted
    pub fn is_empty(&self) -> bool {
        self.submissions.lock().is_empty()
    }
}

impl Transport for RecordingTransport {
    fn submit(&self, frame: Frame) {
        self.submissions.lock().push(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_transport() {
        let transport = RecordingTransport::new();
        assert!(transport.is_empty());

        let mut frame = Frame::new(vec![0u8; 60]);
        frame.meta.device = Some("eth0".to_string());
        transport.submit(frame);

        assert_eq!(transport.len(), 1);
        let recorded = transport.submissions();
        assert_eq!(recorded[0].meta.device.as_deref(), Some("eth0"));
    }
}
