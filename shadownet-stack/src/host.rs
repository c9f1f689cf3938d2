//! Host interface discovery
//!
//! Bridges the real host's datalink layer into the registry: the
//! underlying interface named on the command line is looked up via
//! pnet and mirrored as a registry entry the shadow can attach to.

use crate::registry::{InterfaceRegistry, NetInterface};
use pnet_datalink::NetworkInterface;
use shadownet_core::{Error, LinkType, MacAddr, Result};
use std::sync::Arc;
use tracing::info;

/// Information about a host network interface
#[derive(Debug, Clone)]
pub struct HostInterfaceInfo {
    /// Interface name (e.g., "eth0", "wlan0")
    pub name: String,
    /// MAC address if available
    pub mac: Option<MacAddr>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for HostInterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        HostInterfaceInfo {
            name: iface.name.clone(),
            mac: iface
                .mac
                .map(|mac| MacAddr([mac.0, mac.1, mac.2, mac.3, mac.4, mac.5])),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

/// List all host network interfaces
pub fn list_host_interfaces() -> Result<Vec<HostInterfaceInfo>> {
    let interfaces = pnet_datalink::interfaces();

    if interfaces.is_empty() {
        return Err(Error::datalink(
            "No network interfaces found. Are you running with sufficient privileges?",
        ));
    }

    Ok(interfaces.iter().map(HostInterfaceInfo::from).collect())
}

/// Get information about a specific host interface by name
pub fn get_host_interface(name: &str) -> Result<HostInterfaceInfo> {
    let interfaces = pnet_datalink::interfaces();

    interfaces
        .iter()
        .find(|iface| iface.name == name)
        .map(HostInterfaceInfo::from)
        .ok_or_else(|| Error::NoSuchInterface(name.to_string()))
}

/// Mirror a host interface into the registry so a shadow can attach to it
pub fn mirror_host_interface(
    registry: &InterfaceRegistry,
    name: &str,
) -> Result<Arc<NetInterface>> {
    let host = get_host_interface(name)?;

    let link_type = if host.is_loopback {
        LinkType::Loopback
    } else {
        LinkType::Ethernet
    };
    let mac = host.mac.unwrap_or_else(MacAddr::zero);

    let entry = registry.register(NetInterface::new(
        host.name.clone(),
        mac,
        MacAddr::broadcast(),
        link_type,
    ))?;
    entry.set_up(host.is_up);

    info!("mirrored host interface {} ({}, {})", host.name, mac, link_type);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_host_interfaces() {
        // Should at least have loopback on any test machine
        let interfaces = list_host_interfaces().unwrap();
        assert!(!interfaces.is_empty());
    }

    #[test]
    fn test_get_nonexistent_interface() {
        let result = get_host_interface("nonexistent_interface_xyz");
        assert!(matches!(result, Err(Error::NoSuchInterface(_))));
    }

    #[test]
    fn test_mirror_nonexistent_interface() {
        let registry = InterfaceRegistry::new();
        let result = mirror_host_interface(&registry, "nonexistent_interface_xyz");
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
