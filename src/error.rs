//! Error types for serabut6.
//!
//! Parsing, encoding and configuration failures are library errors built
//! with `thiserror`. Discard decisions live in [`crate::admission`] since
//! they are not failures of the server.

use thiserror::Error;

/// Errors from the DHCPv6 option TLV block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("option header truncated at offset {offset}")]
    Truncated { offset: usize },

    #[error("option at offset {offset} declares {declared} bytes, only {available} available")]
    LengthOverflow {
        offset: usize,
        declared: usize,
        available: usize,
    },

    #[error("option {code} value is {len} bytes, exceeds the 65535 byte limit")]
    ValueTooLong { code: u16, len: usize },
}

/// Errors from decoding, encoding or answering a DHCPv6 packet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("packet too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("packet has malformed options section: {0}")]
    MalformedOptions(#[source] OptionsError),

    #[error("required option {0} is missing")]
    MissingOption(u16),

    #[error("option {code} too short: expected at least {expected} bytes, got {actual}")]
    ShortOption {
        code: u16,
        expected: usize,
        actual: usize,
    },
}

/// Errors from loading the daemon configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid DUID '{0}': expected an even number of hex digits")]
    InvalidDuid(String),
}
