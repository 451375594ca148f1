//! serabut6 - DHCPv6 PXE boot responder
//!
//! Answers DHCPv6 Solicit, Request, Information-Request and Release
//! messages from network-booting clients with a static address and a
//! boot file URL chosen by client architecture.
//!
//! The pipeline for one datagram is:
//! [`Packet::decode`] → [`should_discard`] → [`ResponseBuilder::build`] →
//! [`Packet::encode`]. [`Responder`] runs it on a UDP socket.

pub mod admission;
pub mod config;
pub mod domain;
pub mod error;
pub mod options;
pub mod response;
pub mod server;

pub use admission::{should_discard, DiscardReason};
pub use config::Config;
pub use domain::{ClientArch, Duid, MessageType, Packet, TransactionId};
pub use error::{ConfigError, OptionsError, PacketError};
pub use options::{Dhcp6Option, Options};
pub use response::{BootConfig, ResponseBuilder};
pub use server::Responder;
