//! Link statistics register

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Snapshot of the link counters at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Packets observed on the receive path
    pub rx_packets: u64,
    /// Bytes observed on the receive path
    pub rx_bytes: u64,
    /// Packets submitted on the transmit path
    pub tx_packets: u64,
    /// Bytes submitted on the transmit path
    pub tx_bytes: u64,
}

/// Shared counter set for one shadow link
///
/// Cloning shares the underlying counters. Increments are relaxed
/// atomics; a snapshot taken under concurrent traffic is best-effort,
/// not a consistent cut across all four fields.
#[derive(Debug, Clone)]
pub struct LinkStats {
    rx_packets: Arc<AtomicU64>,
    rx_bytes: Arc<AtomicU64>,
    tx_packets: Arc<AtomicU64>,
    tx_bytes: Arc<AtomicU64>,
}

impl LinkStats {
    /// Create a new counter set, all zeros
    pub fn new() -> Self {
        Self {
            rx_packets: Arc::new(AtomicU64::new(0)),
            rx_bytes: Arc::new(AtomicU64::new(0)),
            tx_packets: Arc::new(AtomicU64::new(0)),
            tx_bytes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record one frame observed on the receive path
    pub fn record_rx(&self, len: usize) {
        self.rx_packets.fetch_add(1, Ordering::Relaxed);
        self.rx_bytes.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Record one frame submitted on the transmit path
    pub fn record_tx(&self, len: usize) {
        self.tx_packets.fetch_add(1, Ordering::Relaxed);
        self.tx_bytes.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Get current counter snapshot
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rx_packets: self.rx_packets.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            tx_packets: self.tx_packets.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.rx_packets.store(0, Ordering::Relaxed);
        self.rx_bytes.store(0, Ordering::Relaxed);
        self.tx_packets.store(0, Ordering::Relaxed);
        self.tx_bytes.store(0, Ordering::Relaxed);
    }
}

impl Default for LinkStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_stats_basic() {
        let stats = LinkStats::new();

        stats.record_rx(64);
        stats.record_rx(128);
        stats.record_tx(256);

        let snap = stats.snapshot();
        assert_eq!(snap.rx_packets, 2);
        assert_eq!(snap.rx_bytes, 192);
        assert_eq!(snap.tx_packets, 1);
        assert_eq!(snap.tx_bytes, 256);
    }

    #[test]
    fn test_stats_shared_via_clone() {
        let stats = LinkStats::new();
        let clone = stats.clone();

        clone.record_tx(100);

        assert_eq!(stats.snapshot().tx_packets, 1);
        assert_eq!(stats.snapshot().tx_bytes, 100);
    }

    #[test]
    fn test_stats_reset() {
        let stats = LinkStats::new();
        stats.record_rx(64);
        stats.record_tx(64);

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_thread_safety() {
        let stats = LinkStats::new();
        let clone = stats.clone();

        let handle = thread::spawn(move || {
            for _ in 0..100 {
                clone.record_rx(64);
            }
        });

        for _ in 0..100 {
            stats.record_tx(64);
        }

        handle.join().unwrap();

        let snap = stats.snapshot();
        assert_eq!(snap.rx_packets, 100);
        assert_eq!(snap.rx_bytes, 6400);
        assert_eq!(snap.tx_packets, 100);
        assert_eq!(snap.tx_bytes, 6400);
    }
}
