//! Known-interface catalog.
//!
//! Interface enumeration belongs to an external collaborator; the engine
//! only consumes the catalog to validate configuration updates and to serve
//! the read surface.

use serde::{Deserialize, Serialize};

/// One capturable network interface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub description: String,
}

/// Supplies the catalog of interfaces a capture may bind to.
pub trait InterfaceProvider {
    fn interfaces(&self) -> Vec<InterfaceInfo>;
}

/// Fallback catalog used when no platform enumerator is wired in.
pub struct StaticInterfaces;

impl InterfaceProvider for StaticInterfaces {
    fn interfaces(&self) -> Vec<InterfaceInfo> {
        vec![
            InterfaceInfo {
                name: "eth0".into(),
                description: "Ethernet Interface".into(),
            },
            InterfaceInfo {
                name: "wlan0".into(),
                description: "Wireless Interface".into(),
            },
            InterfaceInfo {
                name: "lo".into(),
                description: "Loopback Interface".into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_catalog_contains_eth0() {
        let catalog = StaticInterfaces.interfaces();
        assert!(catalog.iter().any(|i| i.name == "eth0"));
        assert_eq!(catalog.len(), 3);
    }
}
