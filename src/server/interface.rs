//! Network interface lookup via pnet.

use anyhow::{anyhow, Result};
use macaddr::MacAddr6;
use pnet::datalink::{self, NetworkInterface};

/// The interface the responder serves.
#[derive(Debug, Clone)]
pub struct ServedInterface {
    pub name: String,
    /// Interface index used for the multicast group membership.
    pub index: u32,
    pub mac: Option<MacAddr6>,
}

impl ServedInterface {
    /// Look up an interface by name.
    pub fn by_name(name: &str) -> Result<Self> {
        datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == name)
            .map(Self::from)
            .ok_or_else(|| anyhow!("Interface not found: {}", name))
    }

    /// First interface that is up, not a loopback and has an IPv6 address.
    pub fn default_interface() -> Result<Self> {
        datalink::interfaces()
            .into_iter()
            .find(|iface| {
                iface.is_up() && !iface.is_loopback() && iface.ips.iter().any(|ip| ip.is_ipv6())
            })
            .map(Self::from)
            .ok_or_else(|| anyhow!("No suitable IPv6 interface found"))
    }
}

impl From<NetworkInterface> for ServedInterface {
    fn from(iface: NetworkInterface) -> Self {
        let mac = iface
            .mac
            .filter(|m| !m.is_zero())
            .map(|m| MacAddr6::new(m.0, m.1, m.2, m.3, m.4, m.5));

        Self {
            name: iface.name,
            index: iface.index,
            mac,
        }
    }
}

/// List all available network interfaces.
pub fn list_interfaces() -> Vec<String> {
    datalink::interfaces()
        .into_iter()
        .map(|iface| {
            let status = if iface.is_up() { "UP" } else { "DOWN" };
            let ips: Vec<_> = iface
                .ips
                .iter()
                .filter(|ip| ip.is_ipv6())
                .map(|ip| ip.to_string())
                .collect();
            format!(
                "{} (index {}): {} [{}]",
                iface.name,
                iface.index,
                status,
                if ips.is_empty() {
                    "no IPv6".to_string()
                } else {
                    ips.join(", ")
                }
            )
        })
        .collect()
}
