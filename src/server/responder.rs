//! DHCPv6 responder implementation.
//!
//! Listens on the DHCPv6 server port and answers PXE clients with an
//! address and a boot file URL. Every datagram is handled on its own:
//! nothing is remembered between packets.

use std::net::{Ipv6Addr, SocketAddr, SocketAddrV6, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::admission::{should_discard, DiscardReason};
use crate::domain::{Duid, Packet};
use crate::error::PacketError;
use crate::response::ResponseBuilder;

/// DHCPv6 ports
pub const DHCP6_SERVER_PORT: u16 = 547;
pub const DHCP6_CLIENT_PORT: u16 = 546;

/// All_DHCP_Relay_Agents_and_Servers (ff02::1:2)
pub const ALL_DHCP_RELAY_AGENTS_AND_SERVERS: Ipv6Addr =
    Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 1, 2);

/// Largest datagram we expect to receive.
const MAX_DATAGRAM: usize = 1500;

/// What became of one inbound datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Encoded response to send back.
    Reply(Vec<u8>),
    /// Dropped by the admission rules.
    Discarded(DiscardReason),
    /// Admitted, but the message type has no response.
    NoResponse,
}

/// DHCPv6 responder for PXE boot.
pub struct Responder {
    /// Our DUID, sent as the Server Identifier.
    server_id: Duid,
    builder: ResponseBuilder,
    bind_addr: SocketAddrV6,
    /// Interface index for the multicast membership (0 lets the kernel pick).
    interface_index: u32,
    running: Arc<AtomicBool>,
}

impl Responder {
    pub fn new(server_id: Duid, builder: ResponseBuilder, bind_addr: SocketAddrV6) -> Self {
        Self {
            server_id,
            builder,
            bind_addr,
            interface_index: 0,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_interface_index(mut self, index: u32) -> Self {
        self.interface_index = index;
        self
    }

    /// Get a handle to stop the server.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Decode, admit, build and encode the answer to one datagram.
    pub fn process(&self, data: &[u8]) -> Result<Outcome, PacketError> {
        let request = Packet::decode(data)?;
        let server_id = self.server_id.as_bytes();

        if let Err(reason) = should_discard(&request, server_id) {
            return Ok(Outcome::Discarded(reason));
        }

        let response = match self.builder.build(&request, server_id)? {
            Some(response) => response,
            None => return Ok(Outcome::NoResponse),
        };

        debug!(
            "{} (xid {}) -> {}",
            request.message_type, request.transaction_id, response.message_type
        );

        let bytes = if self.builder.boot_config().force_advertise_type {
            response.encode_forcing_advertise()?
        } else {
            response.encode()?
        };

        Ok(Outcome::Reply(bytes))
    }

    /// Handle an incoming datagram, returning the bytes to send back.
    ///
    /// Failures and discards are logged; they never stop the server.
    pub fn handle_datagram(&self, data: &[u8], from: SocketAddr) -> Option<Vec<u8>> {
        match self.process(data) {
            Ok(Outcome::Reply(bytes)) => Some(bytes),
            Ok(Outcome::Discarded(reason)) => {
                debug!("Discarding packet from {} ({}): {}", from, reason.kind(), reason);
                None
            }
            Ok(Outcome::NoResponse) => None,
            Err(e) => {
                warn!("Failed to handle packet from {}: {}", from, e);
                None
            }
        }
    }

    /// Start the responder.
    ///
    /// Runs until the running flag is cleared.
    pub fn run(&self) -> Result<()> {
        let socket = self.create_socket()?;

        info!("DHCPv6 responder listening on {}", self.bind_addr);
        info!("Server DUID: {}", self.server_id);
        info!("HTTP boot URL: {}", self.builder.boot_config().http_boot_url);
        info!("iPXE script URL: {}", self.builder.boot_config().ipxe_script_url);

        self.running.store(true, Ordering::SeqCst);

        let mut buf = [0u8; MAX_DATAGRAM];

        while self.running.load(Ordering::SeqCst) {
            match socket.recv_from(&mut buf) {
                Ok((len, from)) => {
                    if let Some(response) = self.handle_datagram(&buf[..len], from) {
                        if let Err(e) = socket.send_to(&response, from) {
                            error!("Failed to send reply to {}: {}", from, e);
                        }
                    }
                }
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    // Timeout, check running flag
                    continue;
                }
                Err(e) => {
                    error!("DHCPv6 receive error: {}", e);
                }
            }
        }

        info!("DHCPv6 responder stopped");
        Ok(())
    }

    /// Create an IPv6 UDP socket joined to the DHCPv6 server multicast group.
    fn create_socket(&self) -> Result<UdpSocket> {
        use socket2::{Domain, Protocol, Socket, Type};

        let socket = Socket::new(Domain::IPV6, Type::DGRAM, Some(Protocol::UDP))
            .context("Failed to create socket")?;

        socket.set_only_v6(true)?;
        socket.set_reuse_address(true)?;

        socket
            .bind(&SocketAddr::V6(self.bind_addr).into())
            .with_context(|| format!("Failed to bind to {}", self.bind_addr))?;

        socket
            .join_multicast_v6(&ALL_DHCP_RELAY_AGENTS_AND_SERVERS, self.interface_index)
            .with_context(|| {
                format!(
                    "Failed to join {} on interface {}",
                    ALL_DHCP_RELAY_AGENTS_AND_SERVERS, self.interface_index
                )
            })?;

        socket.set_read_timeout(Some(Duration::from_millis(100)))?;

        Ok(socket.into())
    }
}
