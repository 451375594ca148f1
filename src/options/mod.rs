//! DHCPv6 option store.
//!
//! Turns the TLV option block of a packet into a keyed collection and
//! back, and builds the nested options (IA_NA, IA Address, Status Code)
//! the responder emits.

mod store;

pub use store::{Dhcp6Option, Options};

/// DHCPv6 option codes (RFC 8415, RFC 5970).
pub mod option_codes {
    pub const CLIENT_ID: u16 = 1;
    pub const SERVER_ID: u16 = 2;
    pub const IA_NA: u16 = 3;
    pub const IA_TA: u16 = 4;
    pub const IA_ADDR: u16 = 5;
    pub const ORO: u16 = 6;
    pub const PREFERENCE: u16 = 7;
    pub const ELAPSED_TIME: u16 = 8;
    pub const STATUS_CODE: u16 = 13;
    pub const RAPID_COMMIT: u16 = 14;
    pub const USER_CLASS: u16 = 15;
    pub const VENDOR_CLASS: u16 = 16;
    pub const DNS_SERVERS: u16 = 23;
    pub const BOOTFILE_URL: u16 = 59;
    pub const BOOTFILE_PARAM: u16 = 60;
    pub const CLIENT_ARCH_TYPE: u16 = 61;
}

/// Size of the code + length header in front of every option value.
pub const OPTION_HEADER_LEN: usize = 4;
