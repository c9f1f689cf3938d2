//! Shadow interface lifecycle
//!
//! [`ShadowInterface::attach`] resolves the underlying interface, clones
//! its link-layer and broadcast addresses onto a freshly named virtual
//! entry, registers it, and installs the ARP classifier as the receive
//! tap. Any failure after a resource has been acquired unwinds in
//! reverse order. [`ShadowInterface::detach`] removes the tap strictly
//! before the virtual entry leaves the registry: the tap must never be
//! able to fire against a deregistered interface.

use crate::classifier::ArpClassifier;
use crate::registry::{InterfaceRegistry, NetInterface, TxHandler};
use crate::stats::{LinkStats, StatsSnapshot};
use crate::transport::Transport;
use shadownet_core::{Error, Frame, Result};
use std::sync::Arc;
use tracing::info;

/// Attach-time configuration
#[derive(Debug, Clone)]
pub struct ShadowConfig {
    /// Name of the underlying interface to shadow
    pub link: String,
    /// Name prefix for the shadow interface; the registry appends the
    /// first free numeric suffix
    pub ifname: String,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            link: "eth0".to_string(),
            ifname: "virt".to_string(),
        }
    }
}

/// A live shadow interface, attached to its underlying interface
pub struct ShadowInterface {
    registry: Arc<InterfaceRegistry>,
    child: Arc<NetInterface>,
    parent: Arc<NetInterface>,
    stats: LinkStats,
}

impl std::fmt::Debug for ShadowInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowInterface")
            .field("child", &self.child.name())
            .field("parent", &self.parent.name())
            .finish_non_exhaustive()
    }
}

impl ShadowInterface {
    /// Create the shadow interface and attach it to the underlying one
    ///
    /// On success the registry holds one new entry named
    /// `<prefix><suffix>` whose link-layer and broadcast addresses equal
    /// the underlying interface's, with the transmit redirector
    /// installed, and the underlying interface carries the receive tap.
    pub fn attach(
        registry: Arc<InterfaceRegistry>,
        config: &ShadowConfig,
        stats: LinkStats,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let parent = registry
            .lookup(&config.link)
            .ok_or_else(|| Error::NoSuchInterface(config.link.clone()))?;

        if !parent.link_type().is_shadowable() {
            return Err(Error::UnsupportedLinkType {
                name: parent.name().to_string(),
                link_type: parent.link_type().to_string(),
            });
        }

        // Clone the parent's addresses onto the new entry.
        let name = registry.allocate_name(&config.ifname);
        let child = registry.register(NetInterface::new(
            name,
            parent.mac(),
            parent.broadcast(),
            parent.link_type(),
        ))?;

        child.set_tx_handler(Box::new(Redirector {
            parent: Some(Arc::clone(&parent)),
            stats: stats.clone(),
            transport,
        }));

        let classifier = Arc::new(ArpClassifier::new(stats.clone()));
        if let Err(e) = registry.install_tap(&parent, classifier) {
            // Unwind the registration before reporting the failure.
            registry.deregister(child.name());
            return Err(e);
        }

        info!("created link {} shadowing {}", child.name(), parent.name());
        info!("registered receive tap on {}", parent.name());

        Ok(Self {
            registry,
            child,
            parent,
            stats,
        })
    }

    /// Name assigned to the shadow interface
    pub fn name(&self) -> &str {
        self.child.name()
    }

    /// The shadow interface's registry entry
    pub fn interface(&self) -> &Arc<NetInterface> {
        &self.child
    }

    /// The underlying interface's registry entry
    pub fn underlying(&self) -> &Arc<NetInterface> {
        &self.parent
    }

    /// Bring the shadow interface up
    pub fn open(&self) {
        self.child.set_up(true);
        info!("{}: device opened", self.child.name());
    }

    /// Take the shadow interface down
    pub fn close(&self) {
        self.child.set_up(false);
        info!("{}: device closed", self.child.name());
    }

    /// Current counter snapshot
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Detach from the underlying interface and deregister
    ///
    /// Tap removal happens first, under the registry lock; only then is
    /// the shadow entry deregistered. Consumes the handle, so detach
    /// runs at most once.
    pub fn detach(self) {
        self.registry.remove_tap(&self.parent);
        info!("removed receive tap from {}", self.parent.name());

        self.registry.deregister(self.child.name());
        info!("destroyed link {}", self.child.name());
    }
}

/// Transmit entry point of the shadow interface: re-targets every frame
/// onto the underlying interface
struct Redirector {
    // Fixed at attach time and never cleared; kept optional so a missing
    // parent degrades to count-and-drop instead of an error.
    parent: Option<Arc<NetInterface>>,
    stats: LinkStats,
    transport: Arc<dyn Transport>,
}

impl TxHandler for Redirector {
    fn transmit(&self, mut frame: Frame) {
        // Counted before the liveness check, for every protocol.
        self.stats.record_tx(frame.len());

        if let Some(parent) = &self.parent {
            frame.meta.device = Some(parent.name().to_string());
            frame.meta.priority = 1;
            self.transport.submit(frame);
        }
    }
}
