//! Interface registry and registered interface entries
//!
//! The registry models the host's interface table: lookup by name,
//! registration, deregistration, unique name allocation, and the
//! receive-hook facility. All mutations are serialized under one global
//! lock, held only for the duration of the mutation, and every mutation
//! is appended to a journal so teardown ordering can be audited.

use crate::tap::{Continue, FrameObserver};
use parking_lot::Mutex;
use shadownet_core::{Error, Frame, LinkType, MacAddr, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default maximum number of registered interfaces
const DEFAULT_CAPACITY: usize = 256;

/// One entry in the interface registry
///
/// Entries are shared as `Arc<NetInterface>`; holders of a clone (for
/// example a shadow interface's back-reference) keep the entry alive
/// even after it leaves the registry.
pub struct NetInterface {
    name: String,
    mac: MacAddr,
    broadcast: MacAddr,
    link_type: LinkType,
    up: AtomicBool,
    tap: Mutex<Option<Arc<dyn FrameObserver>>>,
    tx_handler: Mutex<Option<Box<dyn TxHandler>>>,
}

/// Transmit entry point of an interface
pub trait TxHandler: Send + Sync {
    /// Submit one frame for transmission. Fire-and-forget: the caller
    /// never learns whether the frame made it onto the wire.
    fn transmit(&self, frame: Frame);
}

impl NetInterface {
    /// Create a new, not yet registered interface entry
    pub fn new(
        name: impl Into<String>,
        mac: MacAddr,
        broadcast: MacAddr,
        link_type: LinkType,
    ) -> Self {
        Self {
            name: name.into(),
            mac,
            broadcast,
            link_type,
            up: AtomicBool::new(false),
            tap: Mutex::new(None),
            tx_handler: Mutex::new(None),
        }
    }

    /// Interface name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Link-layer address
    pub fn mac(&self) -> MacAddr {
        self.mac
    }

    /// Broadcast address
    pub fn broadcast(&self) -> MacAddr {
        self.broadcast
    }

    /// Link-layer type
    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// Operational state
    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Relaxed)
    }

    /// Flip the operational state
    pub fn set_up(&self, up: bool) {
        self.up.store(up, Ordering::Relaxed);
    }

    /// Whether a receive tap is currently installed
    pub fn has_tap(&self) -> bool {
        self.tap.lock().is_some()
    }

    /// Install the transmit entry point
    pub fn set_tx_handler(&self, handler: Box<dyn TxHandler>) {
        *self.tx_handler.lock() = Some(handler);
    }

    /// Deliver one inbound frame to this interface's receive path
    ///
    /// The tap, if installed, sees the frame first; its only possible
    /// verdict is [`Continue`], after which the frame proceeds through
    /// normal protocol dispatch untouched.
    pub fn receive(&self, frame: &Frame) {
        let tap = self.tap.lock().clone();
        if let Some(tap) = tap {
            let Continue = tap.observe(frame);
        }
    }

    /// Submit one frame for transmission on this interface
    pub fn transmit(&self, frame: Frame) {
        let handler = self.tx_handler.lock();
        match handler.as_ref() {
            Some(handler) => handler.transmit(frame),
            None => debug!("{}: transmit with no handler installed, frame dropped", self.name),
        }
    }
}

impl std::fmt::Debug for NetInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetInterface")
            .field("name", &self.name)
            .field("mac", &self.mac)
            .field("link_type", &self.link_type)
            .field("up", &self.is_up())
            .finish()
    }
}

/// A registry mutation, as recorded in the journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An interface was registered under this name
    Registered(String),
    /// An interface was deregistered
    Deregistered(String),
    /// A receive tap was installed on this interface
    TapInstalled(String),
    /// The receive tap was removed from this interface
    TapRemoved(String),
}

struct RegistryInner {
    interfaces: Vec<Arc<NetInterface>>,
    journal: Vec<RegistryEvent>,
    capacity: usize,
}

/// The host interface table
pub struct InterfaceRegistry {
    // Global registry lock. Held only across individual mutations,
    // never while a frame is processed.
    inner: Mutex<RegistryInner>,
}

impl InterfaceRegistry {
    /// Create a registry with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a registry bounded to `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                interfaces: Vec::new(),
                journal: Vec::new(),
                capacity,
            }),
        }
    }

    /// Register an interface
    ///
    /// Fails with [`Error::OutOfMemory`] when the table is full (checked
    /// before the name is taken) and [`Error::RegistrationFailed`] when
    /// the name is already registered.
    pub fn register(&self, iface: NetInterface) -> Result<Arc<NetInterface>> {
        let mut inner = self.inner.lock();

        if inner.interfaces.len() >= inner.capacity {
            return Err(Error::OutOfMemory(iface.name));
        }
        if inner.interfaces.iter().any(|i| i.name == iface.name) {
            return Err(Error::registration(format!(
                "name '{}' already registered",
                iface.name
            )));
        }

        let iface = Arc::new(iface);
        let event = RegistryEvent::Registered(iface.name.clone());
        inner.interfaces.push(Arc::clone(&iface));
        inner.journal.push(event);

        debug!("registered interface {}", iface.name);
        Ok(iface)
    }

    /// Deregister an interface by name
    ///
    /// Silently ignores names that are not registered; deregistration is
    /// a shutdown-path operation and is not expected to fail.
    pub fn deregister(&self, name: &str) {
        let mut inner = self.inner.lock();

        match inner.interfaces.iter().position(|i| i.name == name) {
            Some(pos) => {
                inner.interfaces.remove(pos);
                inner.journal.push(RegistryEvent::Deregistered(name.to_string()));
                debug!("deregistered interface {}", name);
            }
            None => warn!("deregister: interface {} not registered", name),
        }
    }

    /// Look up a registered interface by name
    pub fn lookup(&self, name: &str) -> Option<Arc<NetInterface>> {
        let inner = self.inner.lock();
        inner.interfaces.iter().find(|i| i.name == name).cloned()
    }

    /// Allocate the first free name of the form `prefix<N>`
    pub fn allocate_name(&self, prefix: &str) -> String {
        let inner = self.inner.lock();
        (0..)
            .map(|n| format!("{}{}", prefix, n))
            .find(|candidate| !inner.interfaces.iter().any(|i| &i.name == candidate))
            .unwrap_or_else(|| format!("{}0", prefix))
    }

    /// Install a receive tap on `iface`, under the global lock
    ///
    /// At most one tap may exist per interface; a second install fails
    /// with [`Error::TapInstallFailed`] and leaves the first in place.
    pub fn install_tap(
        &self,
        iface: &Arc<NetInterface>,
        observer: Arc<dyn FrameObserver>,
    ) -> Result<()> {
        let mut inner = self.inner.lock();

        {
            let mut slot = iface.tap.lock();
            if slot.is_some() {
                return Err(Error::TapInstallFailed(format!(
                    "a tap is already installed on '{}'",
                    iface.name
                )));
            }
            *slot = Some(observer);
        }

        inner.journal.push(RegistryEvent::TapInstalled(iface.name.clone()));
        debug!("installed receive tap on {}", iface.name);
        Ok(())
    }

    /// Remove the receive tap from `iface`, under the global lock
    ///
    /// Skipped silently when no tap is installed.
    pub fn remove_tap(&self, iface: &Arc<NetInterface>) {
        let mut inner = self.inner.lock();

        if iface.tap.lock().take().is_some() {
            inner.journal.push(RegistryEvent::TapRemoved(iface.name.clone()));
            debug!("removed receive tap from {}", iface.name);
        }
    }

    /// Number of registered interfaces
    pub fn len(&self) -> usize {
        self.inner.lock().interfaces.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the mutation journal, oldest first
    pub fn journal(&self) -> Vec<RegistryEvent> {
        self.inner.lock().journal.clone()
    }
}

impl Default for InterfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth(name: &str) -> NetInterface {
        NetInterface::new(
            name,
            MacAddr([0, 1, 2, 3, 4, 5]),
            MacAddr::broadcast(),
            LinkType::Ethernet,
        )
    }

    struct NullObserver;
    impl FrameObserver for NullObserver {
        fn observe(&self, _frame: &Frame) -> Continue {
            Continue
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = InterfaceRegistry::new();
        registry.register(eth("eth0")).unwrap();

        assert_eq!(registry.len(), 1);
        let found = registry.lookup("eth0").unwrap();
        assert_eq!(found.mac().octets(), [0, 1, 2, 3, 4, 5]);
        assert!(registry.lookup("eth1").is_none());
    }

    #[test]
    fn test_register_duplicate_name() {
        let registry = InterfaceRegistry::new();
        registry.register(eth("eth0")).unwrap();

        let err = registry.register(eth("eth0")).unwrap_err();
        assert!(matches!(err, Error::RegistrationFailed(_)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_capacity_exhausted() {
        let registry = InterfaceRegistry::with_capacity(1);
        registry.register(eth("eth0")).unwrap();

        let err = registry.register(eth("eth1")).unwrap_err();
        assert!(matches!(err, Error::OutOfMemory(_)));
    }

    #[test]
    fn test_deregister_missing_is_silent() {
        let registry = InterfaceRegistry::new();
        registry.deregister("nope");
        assert!(registry.journal().is_empty());
    }

    #[test]
    fn test_allocate_name_skips_taken_suffixes() {
        let registry = InterfaceRegistry::new();
        assert_eq!(registry.allocate_name("virt"), "virt0");

        registry.register(eth("virt0")).unwrap();
        assert_eq!(registry.allocate_name("virt"), "virt1");
    }

    #[test]
    fn test_single_tap_per_interface() {
        let registry = InterfaceRegistry::new();
        let iface = registry.register(eth("eth0")).unwrap();

        registry.install_tap(&iface, Arc::new(NullObserver)).unwrap();
        assert!(iface.has_tap());

        let err = registry
            .install_tap(&iface, Arc::new(NullObserver))
            .unwrap_err();
        assert!(matches!(err, Error::TapInstallFailed(_)));
        assert!(iface.has_tap());
    }

    #[test]
    fn test_remove_tap_idempotent() {
        let registry = InterfaceRegistry::new();
        let iface = registry.register(eth("eth0")).unwrap();

        registry.install_tap(&iface, Arc::new(NullObserver)).unwrap();
        registry.remove_tap(&iface);
        assert!(!iface.has_tap());

        // second removal is a silent no-op
        registry.remove_tap(&iface);

        let journal = registry.journal();
        let removals = journal
            .iter()
            .filter(|e| matches!(e, RegistryEvent::TapRemoved(_)))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn test_journal_records_mutations_in_order() {
        let registry = InterfaceRegistry::new();
        let iface = registry.register(eth("eth0")).unwrap();
        registry.install_tap(&iface, Arc::new(NullObserver)).unwrap();
        registry.remove_tap(&iface);
        registry.deregister("eth0");

        assert_eq!(
            registry.journal(),
            vec![
                RegistryEvent::Registered("eth0".to_string()),
                RegistryEvent::TapInstalled("eth0".to_string()),
                RegistryEvent::TapRemoved("eth0".to_string()),
                RegistryEvent::Deregistered("eth0".to_string()),
            ]
        );
    }

    #[test]
    fn test_receive_without_tap_is_noop() {
        let iface = eth("eth0");
        iface.receive(&Frame::new(vec![0u8; 60]));
    }

    #[test]
    fn test_up_down() {
        let iface = eth("eth0");
        assert!(!iface.is_up());
        iface.set_up(true);
        assert!(iface.is_up());
    }
}
