//! Response construction.
//!
//! Derives the Advertise or Reply for an admitted request. Addressing and
//! boot values come from [`BootConfig`] rather than being fixed in code.

mod builder;

pub use builder::ResponseBuilder;

use std::net::Ipv6Addr;

/// Message carried in the Status Code option of a Release reply.
pub const RELEASE_STATUS_MESSAGE: &str = "Release received.";

/// Static addressing and boot values handed to every client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    /// Address placed in the IA Address option.
    pub address: Ipv6Addr,
    /// Preferred lifetime in seconds.
    pub preferred_lifetime: u32,
    /// Valid lifetime in seconds.
    pub valid_lifetime: u32,
    /// Boot File URL for UEFI HTTP clients.
    pub http_boot_url: String,
    /// Boot File URL for every other client (iPXE chainload).
    pub ipxe_script_url: String,
    /// Enterprise number of the Vendor Class sent to HTTP clients.
    pub vendor_enterprise_number: u32,
    /// Vendor class data sent to HTTP clients.
    pub vendor_class: String,
    /// Write Advertise in the type byte of every outgoing packet.
    pub force_advertise_type: bool,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            address: Ipv6Addr::new(0x2001, 0xdb8, 0xf00f, 0xcafe, 0, 0, 0, 0x99),
            preferred_lifetime: 27000,
            valid_lifetime: 43200,
            http_boot_url: "http://[2001:db8:f00f:cafe::4]/bootx64.efi".to_string(),
            ipxe_script_url: "http://[2001:db8:f00f:cafe::4]/script.ipxe".to_string(),
            vendor_enterprise_number: 0,
            vendor_class: "HTTPClient".to_string(),
            force_advertise_type: false,
        }
    }
}
