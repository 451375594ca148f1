//! DHCPv6 packet model and wire codec.
//!
//! ```text
//! byte 0       : message type
//! bytes 1..3   : transaction id
//! bytes 4..end : options
//! ```

use std::fmt;

use super::MessageType;
use crate::error::PacketError;
use crate::options::Options;

/// Message type byte plus transaction id.
pub const HEADER_LEN: usize = 4;

/// Client-chosen transaction id, echoed unchanged in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransactionId(pub [u8; 3]);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// A decoded DHCPv6 client/server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub message_type: MessageType,
    pub transaction_id: TransactionId,
    pub options: Options,
}

impl Packet {
    pub fn new(message_type: MessageType, transaction_id: TransactionId, options: Options) -> Self {
        Self {
            message_type,
            transaction_id,
            options,
        }
    }

    /// Decode a packet from a UDP payload.
    ///
    /// The message type byte is not validated here; unknown values are
    /// kept and rejected later by the admission filter.
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        if data.len() < HEADER_LEN {
            return Err(PacketError::TooShort {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }

        let options = Options::parse(&data[HEADER_LEN..]).map_err(PacketError::MalformedOptions)?;

        Ok(Self {
            message_type: MessageType::from_u8(data[0]),
            transaction_id: TransactionId([data[1], data[2], data[3]]),
            options,
        })
    }

    /// Encode the packet with its own message type in the header.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        self.encode_with_type(self.message_type)
    }

    /// Encode with Advertise in the type byte whatever the packet's type.
    ///
    /// Matches the header written by earlier releases of the responder.
    pub fn encode_forcing_advertise(&self) -> Result<Vec<u8>, PacketError> {
        self.encode_with_type(MessageType::Advertise)
    }

    fn encode_with_type(&self, message_type: MessageType) -> Result<Vec<u8>, PacketError> {
        let options = self.options.serialize().map_err(PacketError::MalformedOptions)?;

        let mut out = Vec::with_capacity(HEADER_LEN + options.len());
        out.push(message_type.to_u8());
        out.extend_from_slice(&self.transaction_id.0);
        out.extend_from_slice(&options);
        Ok(out)
    }
}
