//! DHCPv6 responder module.
//!
//! Owns the UDP socket and runs the decode, admit, build, encode pipeline
//! for every datagram received on the DHCPv6 server port.

mod interface;
mod responder;

pub use interface::{list_interfaces, ServedInterface};
pub use responder::{
    Outcome, Responder, ALL_DHCP_RELAY_AGENTS_AND_SERVERS, DHCP6_CLIENT_PORT, DHCP6_SERVER_PORT,
};
