//! Builds Advertise and Reply packets for admitted requests.

use tracing::debug;

use super::{BootConfig, RELEASE_STATUS_MESSAGE};
use crate::domain::{ClientArch, MessageType, Packet, TransactionId};
use crate::error::PacketError;
use crate::options::{option_codes, Dhcp6Option, Options};

/// Builds the server's answer to a request.
///
/// Callers must run the admission filter first: a request missing an
/// option this builder needs is reported as an error, not answered.
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    boot: BootConfig,
}

impl ResponseBuilder {
    pub fn new(boot: BootConfig) -> Self {
        Self { boot }
    }

    pub fn boot_config(&self) -> &BootConfig {
        &self.boot
    }

    /// Build the response for `request`.
    ///
    /// Returns `Ok(None)` for message types this server never answers.
    pub fn build(&self, request: &Packet, server_id: &[u8]) -> Result<Option<Packet>, PacketError> {
        let xid = request.transaction_id;

        let response = match request.message_type {
            MessageType::Solicit => {
                self.address_reply(MessageType::Advertise, xid, server_id, &request.options)?
            }
            MessageType::Request => {
                self.address_reply(MessageType::Reply, xid, server_id, &request.options)?
            }
            MessageType::InformationRequest => {
                self.information_reply(xid, server_id, &request.options)?
            }
            MessageType::Release => self.release_reply(xid, server_id, &request.options)?,
            MessageType::Advertise
            | MessageType::Confirm
            | MessageType::Renew
            | MessageType::Rebind
            | MessageType::Reply
            | MessageType::Decline
            | MessageType::Reconfigure
            | MessageType::RelayForward
            | MessageType::RelayReply
            | MessageType::Unknown(_) => {
                debug!("No response defined for {} (xid {})", request.message_type, xid);
                return Ok(None);
            }
        };

        Ok(Some(response))
    }

    /// Advertise/Reply carrying an address and boot file.
    fn address_reply(
        &self,
        message_type: MessageType,
        xid: TransactionId,
        server_id: &[u8],
        request: &Options,
    ) -> Result<Packet, PacketError> {
        let client_id = required(request, option_codes::CLIENT_ID)?;
        let iaid = ia_na_id(request)?;
        let arch = client_arch(request)?;

        let mut options = identity_options(client_id, server_id);

        let ia_addr: Options = [Dhcp6Option::ia_address(
            self.boot.address,
            self.boot.preferred_lifetime,
            self.boot.valid_lifetime,
        )]
        .into_iter()
        .collect();
        options.insert(Dhcp6Option::ia_na(iaid, 0, 0, &ia_addr).map_err(PacketError::MalformedOptions)?);

        self.add_boot_options(&mut options, arch)?;

        Ok(Packet::new(message_type, xid, options))
    }

    fn information_reply(
        &self,
        xid: TransactionId,
        server_id: &[u8],
        request: &Options,
    ) -> Result<Packet, PacketError> {
        let client_id = required(request, option_codes::CLIENT_ID)?;
        let arch = client_arch(request)?;

        let mut options = identity_options(client_id, server_id);
        self.add_boot_options(&mut options, arch)?;

        Ok(Packet::new(MessageType::Reply, xid, options))
    }

    fn release_reply(
        &self,
        xid: TransactionId,
        server_id: &[u8],
        request: &Options,
    ) -> Result<Packet, PacketError> {
        let client_id = required(request, option_codes::CLIENT_ID)?;

        let mut options = identity_options(client_id, server_id);
        options.insert(Dhcp6Option::status_code(0, RELEASE_STATUS_MESSAGE));

        Ok(Packet::new(MessageType::Reply, xid, options))
    }

    /// HTTP clients get the vendor class and the EFI binary, everyone
    /// else gets the iPXE script.
    fn add_boot_options(&self, options: &mut Options, arch: ClientArch) -> Result<(), PacketError> {
        let url = if arch.is_http_client() {
            let vendor_class = Dhcp6Option::vendor_class(
                self.boot.vendor_enterprise_number,
                self.boot.vendor_class.as_bytes(),
            )
            .map_err(PacketError::MalformedOptions)?;
            options.insert(vendor_class);
            &self.boot.http_boot_url
        } else {
            &self.boot.ipxe_script_url
        };

        debug!("Boot file URL for {}: {}", arch, url);
        options.insert(Dhcp6Option::new(option_codes::BOOTFILE_URL, url.as_bytes()));
        Ok(())
    }
}

fn identity_options(client_id: &[u8], server_id: &[u8]) -> Options {
    [
        Dhcp6Option::new(option_codes::CLIENT_ID, client_id),
        Dhcp6Option::new(option_codes::SERVER_ID, server_id),
    ]
    .into_iter()
    .collect()
}

fn required(options: &Options, code: u16) -> Result<&[u8], PacketError> {
    options.value(code).ok_or(PacketError::MissingOption(code))
}

/// The IAID is the first four bytes of the IA_NA value.
fn ia_na_id(options: &Options) -> Result<[u8; 4], PacketError> {
    let value = required(options, option_codes::IA_NA)?;
    match value {
        [a, b, c, d, ..] => Ok([*a, *b, *c, *d]),
        _ => Err(PacketError::ShortOption {
            code: option_codes::IA_NA,
            expected: 4,
            actual: value.len(),
        }),
    }
}

fn client_arch(options: &Options) -> Result<ClientArch, PacketError> {
    let value = required(options, option_codes::CLIENT_ARCH_TYPE)?;
    ClientArch::from_option_value(value).ok_or(PacketError::ShortOption {
        code: option_codes::CLIENT_ARCH_TYPE,
        expected: 2,
        actual: value.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_ID: &[u8] = &[0x00, 0x03, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01];
    const CLIENT_ID: &[u8] = &[0x00, 0x01, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef];
    const XID: TransactionId = TransactionId([0x0a, 0x0b, 0x0c]);

    fn request(message_type: MessageType, arch: Option<u16>, with_ia_na: bool) -> Packet {
        let mut options: Options = [
            Dhcp6Option::new(option_codes::CLIENT_ID, CLIENT_ID),
            Dhcp6Option::new(option_codes::ORO, vec![0x00, 0x3b]),
        ]
        .into_iter()
        .collect();
        if let Some(arch) = arch {
            options.insert(Dhcp6Option::new(option_codes::CLIENT_ARCH_TYPE, arch.to_be_bytes()));
        }
        if with_ia_na {
            options.insert(Dhcp6Option::new(
                option_codes::IA_NA,
                vec![0x11, 0x22, 0x33, 0x44, 0, 0, 0, 0, 0, 0, 0, 0],
            ));
        }
        Packet::new(message_type, XID, options)
    }

    fn build(request: &Packet) -> Option<Packet> {
        ResponseBuilder::default().build(request, SERVER_ID).unwrap()
    }

    fn boot_url(packet: &Packet) -> String {
        String::from_utf8(packet.options.value(option_codes::BOOTFILE_URL).unwrap().to_vec())
            .unwrap()
    }

    mod solicit_tests {
        use super::*;

        #[test]
        fn test_http_client_gets_efi_binary() {
            let response = build(&request(MessageType::Solicit, Some(0x0010), true)).unwrap();

            assert_eq!(response.message_type, MessageType::Advertise);
            assert_eq!(response.transaction_id, XID);
            assert!(response.options.has(option_codes::VENDOR_CLASS));
            assert!(boot_url(&response).ends_with("bootx64.efi"));
        }

        #[test]
        fn test_other_arch_gets_ipxe_script() {
            let response = build(&request(MessageType::Solicit, Some(0x0007), true)).unwrap();

            assert!(!response.options.has(option_codes::VENDOR_CLASS));
            assert!(boot_url(&response).ends_with("script.ipxe"));
        }

        #[test]
        fn test_identity_options_echoed() {
            let response = build(&request(MessageType::Solicit, Some(0), true)).unwrap();
            assert_eq!(response.options.value(option_codes::CLIENT_ID), Some(CLIENT_ID));
            assert_eq!(response.options.value(option_codes::SERVER_ID), Some(SERVER_ID));
        }

        #[test]
        fn test_ia_na_carries_configured_address() {
            let response = build(&request(MessageType::Solicit, Some(0), true)).unwrap();
            let ia_na = response.options.value(option_codes::IA_NA).unwrap();

            assert_eq!(&ia_na[..4], &[0x11, 0x22, 0x33, 0x44]);
            let inner = Options::parse(&ia_na[12..]).unwrap();
            let boot = BootConfig::default();
            assert_eq!(
                inner.get(option_codes::IA_ADDR),
                Some(&Dhcp6Option::ia_address(
                    boot.address,
                    boot.preferred_lifetime,
                    boot.valid_lifetime
                ))
            );
        }

        #[test]
        fn test_injected_boot_config() {
            let boot = BootConfig {
                ipxe_script_url: "http://[fd00::1]/menu.ipxe".to_string(),
                ..BootConfig::default()
            };
            let response = ResponseBuilder::new(boot)
                .build(&request(MessageType::Solicit, Some(7), true), SERVER_ID)
                .unwrap()
                .unwrap();
            assert_eq!(boot_url(&response), "http://[fd00::1]/menu.ipxe");
        }

        #[test]
        fn test_missing_ia_na_fails() {
            let result = ResponseBuilder::default()
                .build(&request(MessageType::Solicit, Some(7), false), SERVER_ID);
            assert_eq!(result, Err(PacketError::MissingOption(option_codes::IA_NA)));
        }

        #[test]
        fn test_missing_arch_fails() {
            let result = ResponseBuilder::default()
                .build(&request(MessageType::Solicit, None, true), SERVER_ID);
            assert_eq!(
                result,
                Err(PacketError::MissingOption(option_codes::CLIENT_ARCH_TYPE))
            );
        }

        #[test]
        fn test_short_ia_na_fails() {
            let mut packet = request(MessageType::Solicit, Some(7), false);
            packet
                .options
                .insert(Dhcp6Option::new(option_codes::IA_NA, vec![0x01, 0x02]));
            let result = ResponseBuilder::default().build(&packet, SERVER_ID);
            assert!(matches!(result, Err(PacketError::ShortOption { expected: 4, actual: 2, .. })));
        }
    }

    mod reply_tests {
        use super::*;

        #[test]
        fn test_request_yields_reply_with_address() {
            let response = build(&request(MessageType::Request, Some(0x10), true)).unwrap();
            assert_eq!(response.message_type, MessageType::Reply);
            assert!(response.options.has_ia_na());
            assert!(boot_url(&response).ends_with("bootx64.efi"));
        }

        #[test]
        fn test_information_request_has_no_address() {
            let response =
                build(&request(MessageType::InformationRequest, Some(0x10), false)).unwrap();
            assert_eq!(response.message_type, MessageType::Reply);
            assert!(!response.options.has_ia_na());
            assert!(response.options.has(option_codes::VENDOR_CLASS));
            assert!(boot_url(&response).ends_with("bootx64.efi"));
        }

        #[test]
        fn test_release_reply_status_message() {
            let response = build(&request(MessageType::Release, None, false)).unwrap();
            assert_eq!(response.message_type, MessageType::Reply);

            let status = response.options.value(option_codes::STATUS_CODE).unwrap();
            assert_eq!(&status[..2], &[0, 0]);
            assert_eq!(&status[2..], b"Release received.");
            assert!(!response.options.has(option_codes::BOOTFILE_URL));
        }

        #[test]
        fn test_unanswered_types() {
            for message_type in [
                MessageType::Advertise,
                MessageType::Confirm,
                MessageType::Renew,
                MessageType::Rebind,
                MessageType::Decline,
                MessageType::RelayForward,
                MessageType::Unknown(99),
            ] {
                assert!(build(&request(message_type, Some(7), true)).is_none());
            }
        }
    }
}
