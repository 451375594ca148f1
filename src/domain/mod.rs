//! Domain models for DHCPv6 PXE boot.
//!
//! This module contains the packet model and the identity types that are
//! independent of any socket concerns.

mod duid;
mod message_type;
mod packet;
mod pxe;

pub use duid::Duid;
pub use message_type::MessageType;
pub use packet::{Packet, TransactionId, HEADER_LEN};
pub use pxe::ClientArch;
