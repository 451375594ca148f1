//! DHCP Unique Identifier for the server.

use std::fmt;

use macaddr::MacAddr6;

use crate::error::ConfigError;

/// DUID type 3: link-layer address (RFC 8415 section 11.4).
const DUID_TYPE_LL: u16 = 3;

/// IANA hardware type for Ethernet.
const HW_TYPE_ETHERNET: u16 = 1;

/// Server DUID, carried as the Server Identifier option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duid(Vec<u8>);

impl Duid {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Build a DUID-LL from an Ethernet MAC address.
    pub fn link_layer(mac: MacAddr6) -> Self {
        let mut bytes = Vec::with_capacity(10);
        bytes.extend_from_slice(&DUID_TYPE_LL.to_be_bytes());
        bytes.extend_from_slice(&HW_TYPE_ETHERNET.to_be_bytes());
        bytes.extend_from_slice(mac.as_bytes());
        Self(bytes)
    }

    /// Parse a DUID written as hex digits, with optional `:` or `-`
    /// separators (e.g. "00:03:00:01:aa:bb:cc:dd:ee:ff").
    pub fn from_hex(text: &str) -> Result<Self, ConfigError> {
        let digits: Vec<u8> = text
            .bytes()
            .filter(|b| *b != b':' && *b != b'-')
            .collect();

        if digits.is_empty() || digits.len() % 2 != 0 {
            return Err(ConfigError::InvalidDuid(text.to_string()));
        }

        digits
            .chunks(2)
            .map(|pair| {
                let hi = hex_value(pair[0]);
                let lo = hex_value(pair[1]);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
                    _ => Err(ConfigError::InvalidDuid(text.to_string())),
                }
            })
            .collect::<Result<Vec<u8>, _>>()
            .map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Duid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Duid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.0.iter().map(|b| format!("{b:02x}")).collect();
        write!(f, "{}", hex.join(":"))
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|d| d as u8)
}
