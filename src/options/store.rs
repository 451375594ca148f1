//! Keyed option container and TLV codec.

use std::collections::BTreeMap;
use std::net::Ipv6Addr;

use super::{option_codes, OPTION_HEADER_LEN};
use crate::error::OptionsError;

/// A single DHCPv6 option.
///
/// The declared length on the wire is always the length of `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dhcp6Option {
    pub code: u16,
    pub value: Vec<u8>,
}

impl Dhcp6Option {
    pub fn new(code: u16, value: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Length of the value as declared in the option header.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Append the option as code, length, value.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<(), OptionsError> {
        let len = u16::try_from(self.value.len()).map_err(|_| OptionsError::ValueTooLong {
            code: self.code,
            len: self.value.len(),
        })?;

        out.extend_from_slice(&self.code.to_be_bytes());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.value);
        Ok(())
    }

    /// IA_NA option: IAID, T1, T2, followed by the encoded `inner` options.
    pub fn ia_na(iaid: [u8; 4], t1: u32, t2: u32, inner: &Options) -> Result<Self, OptionsError> {
        let mut value = Vec::with_capacity(12);
        value.extend_from_slice(&iaid);
        value.extend_from_slice(&t1.to_be_bytes());
        value.extend_from_slice(&t2.to_be_bytes());
        value.extend_from_slice(&inner.serialize()?);
        Ok(Self::new(option_codes::IA_NA, value))
    }

    /// IA Address option without nested options.
    pub fn ia_address(address: Ipv6Addr, preferred_lifetime: u32, valid_lifetime: u32) -> Self {
        let mut value = Vec::with_capacity(24);
        value.extend_from_slice(&address.octets());
        value.extend_from_slice(&preferred_lifetime.to_be_bytes());
        value.extend_from_slice(&valid_lifetime.to_be_bytes());
        Self::new(option_codes::IA_ADDR, value)
    }

    /// Status Code option: 2-byte status followed by a UTF-8 message.
    pub fn status_code(status: u16, message: &str) -> Self {
        let mut value = Vec::with_capacity(2 + message.len());
        value.extend_from_slice(&status.to_be_bytes());
        value.extend_from_slice(message.as_bytes());
        Self::new(option_codes::STATUS_CODE, value)
    }

    /// Vendor Class option carrying a single vendor class data item.
    pub fn vendor_class(enterprise_number: u32, class: &[u8]) -> Result<Self, OptionsError> {
        let len = u16::try_from(class.len()).map_err(|_| OptionsError::ValueTooLong {
            code: option_codes::VENDOR_CLASS,
            len: class.len(),
        })?;

        let mut value = Vec::with_capacity(6 + class.len());
        value.extend_from_slice(&enterprise_number.to_be_bytes());
        value.extend_from_slice(&len.to_be_bytes());
        value.extend_from_slice(class);
        Ok(Self::new(option_codes::VENDOR_CLASS, value))
    }
}

/// Options of one packet, keyed by option code.
///
/// Inserting a code that is already present replaces the earlier option.
/// Options are serialized in ascending code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<u16, Dhcp6Option>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TLV option block.
    pub fn parse(data: &[u8]) -> Result<Self, OptionsError> {
        let mut options = Self::new();
        let mut offset = 0;

        while offset < data.len() {
            if offset + OPTION_HEADER_LEN > data.len() {
                return Err(OptionsError::Truncated { offset });
            }

            let code = u16::from_be_bytes([data[offset], data[offset + 1]]);
            let len = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;
            let start = offset + OPTION_HEADER_LEN;

            if start + len > data.len() {
                return Err(OptionsError::LengthOverflow {
                    offset,
                    declared: len,
                    available: data.len() - start,
                });
            }

            options.insert(Dhcp6Option::new(code, &data[start..start + len]));
            offset = start + len;
        }

        Ok(options)
    }

    /// Serialize back into a TLV option block.
    pub fn serialize(&self) -> Result<Vec<u8>, OptionsError> {
        let mut out = Vec::with_capacity(self.encoded_len());
        for option in self.entries.values() {
            option.encode_into(&mut out)?;
        }
        Ok(out)
    }

    fn encoded_len(&self) -> usize {
        self.entries
            .values()
            .map(|option| OPTION_HEADER_LEN + option.len())
            .sum()
    }

    /// Insert an option, returning the one it replaced.
    pub fn insert(&mut self, option: Dhcp6Option) -> Option<Dhcp6Option> {
        self.entries.insert(option.code, option)
    }

    pub fn get(&self, code: u16) -> Option<&Dhcp6Option> {
        self.entries.get(&code)
    }

    /// Value bytes of the option with the given code.
    pub fn value(&self, code: u16) -> Option<&[u8]> {
        self.get(code).map(|option| option.value.as_slice())
    }

    pub fn has(&self, code: u16) -> bool {
        self.entries.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dhcp6Option> {
        self.entries.values()
    }

    pub fn has_client_id(&self) -> bool {
        self.has(option_codes::CLIENT_ID)
    }

    pub fn has_server_id(&self) -> bool {
        self.has(option_codes::SERVER_ID)
    }

    pub fn has_ia_na(&self) -> bool {
        self.has(option_codes::IA_NA)
    }

    pub fn has_ia_ta(&self) -> bool {
        self.has(option_codes::IA_TA)
    }

    /// Whether the Option Request option lists `code`.
    pub fn requested_option(&self, code: u16) -> bool {
        self.value(option_codes::ORO)
            .map(|oro| {
                oro.chunks_exact(2)
                    .any(|pair| u16::from_be_bytes([pair[0], pair[1]]) == code)
            })
            .unwrap_or(false)
    }

    pub fn requested_boot_file_url(&self) -> bool {
        self.requested_option(option_codes::BOOTFILE_URL)
    }
}

impl FromIterator<Dhcp6Option> for Options {
    fn from_iter<I: IntoIterator<Item = Dhcp6Option>>(iter: I) -> Self {
        let mut options = Self::new();
        for option in iter {
            options.insert(option);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oro(codes: &[u16]) -> Dhcp6Option {
        let value: Vec<u8> = codes.iter().flat_map(|c| c.to_be_bytes()).collect();
        Dhcp6Option::new(option_codes::ORO, value)
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_empty_block() {
            let options = Options::parse(&[]).unwrap();
            assert!(options.is_empty());
        }

        #[test]
        fn test_parse_two_options() {
            let data = [
                0x00, 0x01, 0x00, 0x02, 0xaa, 0xbb, // client id
                0x00, 0x08, 0x00, 0x02, 0x00, 0x00, // elapsed time
            ];
            let options = Options::parse(&data).unwrap();
            assert_eq!(options.len(), 2);
            assert_eq!(options.value(option_codes::CLIENT_ID), Some(&[0xaa, 0xbb][..]));
            assert_eq!(options.value(option_codes::ELAPSED_TIME), Some(&[0, 0][..]));
        }

        #[test]
        fn test_parse_zero_length_option() {
            let data = [0x00, 0x0e, 0x00, 0x00];
            let options = Options::parse(&data).unwrap();
            assert!(options.has(option_codes::RAPID_COMMIT));
            assert!(options.get(option_codes::RAPID_COMMIT).unwrap().is_empty());
        }

        #[test]
        fn test_parse_truncated_header() {
            let data = [0x00, 0x01, 0x00, 0x01, 0xff, 0x00, 0x02];
            assert_eq!(
                Options::parse(&data),
                Err(OptionsError::Truncated { offset: 5 })
            );
        }

        #[test]
        fn test_parse_length_overflow() {
            let data = [0x00, 0x01, 0x00, 0x08, 0xaa, 0xbb];
            assert_eq!(
                Options::parse(&data),
                Err(OptionsError::LengthOverflow {
                    offset: 0,
                    declared: 8,
                    available: 2,
                })
            );
        }

        #[test]
        fn test_duplicate_code_last_wins() {
            let data = [
                0x00, 0x01, 0x00, 0x01, 0x11, //
                0x00, 0x01, 0x00, 0x01, 0x22,
            ];
            let options = Options::parse(&data).unwrap();
            assert_eq!(options.len(), 1);
            assert_eq!(options.value(option_codes::CLIENT_ID), Some(&[0x22][..]));
        }
    }

    mod serialize_tests {
        use super::*;

        #[test]
        fn test_serialize_in_code_order() {
            let mut options = Options::new();
            options.insert(Dhcp6Option::new(option_codes::SERVER_ID, vec![0x02]));
            options.insert(Dhcp6Option::new(option_codes::CLIENT_ID, vec![0x01]));

            assert_eq!(
                options.serialize().unwrap(),
                vec![0x00, 0x01, 0x00, 0x01, 0x01, 0x00, 0x02, 0x00, 0x01, 0x02]
            );
        }

        #[test]
        fn test_serialize_rejects_oversized_value() {
            let mut options = Options::new();
            options.insert(Dhcp6Option::new(option_codes::USER_CLASS, vec![0u8; 70_000]));
            assert_eq!(
                options.serialize(),
                Err(OptionsError::ValueTooLong {
                    code: option_codes::USER_CLASS,
                    len: 70_000,
                })
            );
        }

        #[test]
        fn test_insert_replaces_and_keeps_key_invariant() {
            let mut options = Options::new();
            assert!(options.insert(Dhcp6Option::new(7, vec![1])).is_none());
            let previous = options.insert(Dhcp6Option::new(7, vec![2]));
            assert_eq!(previous, Some(Dhcp6Option::new(7, vec![1])));
            assert!(options.iter().all(|o| options.get(o.code) == Some(o)));
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_requested_boot_file_url() {
            let options: Options = [oro(&[option_codes::DNS_SERVERS, option_codes::BOOTFILE_URL])]
                .into_iter()
                .collect();
            assert!(options.requested_boot_file_url());
            assert!(options.requested_option(option_codes::DNS_SERVERS));
            assert!(!options.requested_option(option_codes::BOOTFILE_PARAM));
        }

        #[test]
        fn test_requested_without_oro() {
            assert!(!Options::new().requested_boot_file_url());
        }

        #[test]
        fn test_odd_length_oro_ignores_trailing_byte() {
            let options: Options = [Dhcp6Option::new(option_codes::ORO, vec![0x00, 0x3b, 0x00])]
                .into_iter()
                .collect();
            assert!(options.requested_boot_file_url());
        }

        #[test]
        fn test_presence_checks() {
            let options: Options = [
                Dhcp6Option::new(option_codes::CLIENT_ID, vec![1]),
                Dhcp6Option::new(option_codes::IA_TA, vec![0; 4]),
            ]
            .into_iter()
            .collect();
            assert!(options.has_client_id());
            assert!(!options.has_server_id());
            assert!(!options.has_ia_na());
            assert!(options.has_ia_ta());
        }
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_ia_address_layout() {
            let addr: Ipv6Addr = "2001:db8::99".parse().unwrap();
            let option = Dhcp6Option::ia_address(addr, 27000, 43200);
            assert_eq!(option.code, option_codes::IA_ADDR);
            assert_eq!(option.len(), 24);
            assert_eq!(&option.value[..16], &addr.octets());
            assert_eq!(&option.value[16..20], &27000u32.to_be_bytes());
            assert_eq!(&option.value[20..24], &43200u32.to_be_bytes());
        }

        #[test]
        fn test_ia_na_nests_inner_options() {
            let addr: Ipv6Addr = "2001:db8::99".parse().unwrap();
            let inner: Options = [Dhcp6Option::ia_address(addr, 1, 2)].into_iter().collect();
            let option = Dhcp6Option::ia_na([1, 2, 3, 4], 0, 0, &inner).unwrap();

            assert_eq!(option.code, option_codes::IA_NA);
            assert_eq!(&option.value[..4], &[1, 2, 3, 4]);
            assert_eq!(&option.value[4..12], &[0; 8]);

            let nested = Options::parse(&option.value[12..]).unwrap();
            assert_eq!(nested.get(option_codes::IA_ADDR), inner.get(option_codes::IA_ADDR));
        }

        #[test]
        fn test_status_code() {
            let option = Dhcp6Option::status_code(0, "ok");
            assert_eq!(option.value, vec![0x00, 0x00, b'o', b'k']);
        }

        #[test]
        fn test_vendor_class_http_client() {
            let option = Dhcp6Option::vendor_class(0, b"HTTPClient").unwrap();
            assert_eq!(
                option.value,
                vec![0, 0, 0, 0, 0, 10, 72, 84, 84, 80, 67, 108, 105, 101, 110, 116]
            );
        }
    }
}
