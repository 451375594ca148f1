//! Per-message-type discard rules.

use thiserror::Error;

use crate::domain::{MessageType, Packet};
use crate::options::{option_codes, Options};

/// Why a request is dropped without an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscardReason {
    #[error("'{0}' packet doesn't request the boot file url option")]
    BootFileUrlNotRequested(MessageType),

    #[error("'{0}' packet has no client id option")]
    MissingClientId(MessageType),

    #[error("'{0}' packet has no server id option")]
    MissingServerId(MessageType),

    #[error("'{0}' packet has a server id option")]
    UnexpectedServerId(MessageType),

    #[error("'{message_type}' packet's server id option ({theirs:02x?}) is different from ours ({ours:02x?})")]
    ServerIdMismatch {
        message_type: MessageType,
        theirs: Vec<u8>,
        ours: Vec<u8>,
    },

    #[error("'{0}' packet has an IA option present")]
    IaOptionPresent(MessageType),

    #[error("unknown packet type '{0}'")]
    UnknownMessageType(MessageType),
}

impl DiscardReason {
    /// Short machine-friendly name of the rule that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BootFileUrlNotRequested(_) => "not-requested-boot-url",
            Self::MissingClientId(_) => "missing-client-id",
            Self::MissingServerId(_) => "missing-server-id",
            Self::UnexpectedServerId(_) => "unexpected-server-id",
            Self::ServerIdMismatch { .. } => "server-id-mismatch",
            Self::IaOptionPresent(_) => "ia-option-present",
            Self::UnknownMessageType(_) => "unknown-message-type",
        }
    }
}

/// Check `packet` against the admission rules for its message type.
///
/// The first failing rule is returned; `Ok(())` means the packet should
/// be answered.
pub fn should_discard(packet: &Packet, server_id: &[u8]) -> Result<(), DiscardReason> {
    let options = &packet.options;

    match packet.message_type {
        MessageType::Solicit => check_solicit(options),
        MessageType::Request => check_request(options, server_id),
        MessageType::InformationRequest => check_information_request(options, server_id),
        // No release policy exists yet; every Release is acknowledged.
        MessageType::Release => Ok(()),
        other @ (MessageType::Advertise
        | MessageType::Confirm
        | MessageType::Renew
        | MessageType::Rebind
        | MessageType::Reply
        | MessageType::Decline
        | MessageType::Reconfigure
        | MessageType::RelayForward
        | MessageType::RelayReply
        | MessageType::Unknown(_)) => Err(DiscardReason::UnknownMessageType(other)),
    }
}

fn check_solicit(options: &Options) -> Result<(), DiscardReason> {
    let message_type = MessageType::Solicit;

    if !options.requested_boot_file_url() {
        return Err(DiscardReason::BootFileUrlNotRequested(message_type));
    }
    if !options.has_client_id() {
        return Err(DiscardReason::MissingClientId(message_type));
    }
    if options.has_server_id() {
        return Err(DiscardReason::UnexpectedServerId(message_type));
    }
    Ok(())
}

fn check_request(options: &Options, server_id: &[u8]) -> Result<(), DiscardReason> {
    let message_type = MessageType::Request;

    if !options.requested_boot_file_url() {
        return Err(DiscardReason::BootFileUrlNotRequested(message_type));
    }
    if !options.has_client_id() {
        return Err(DiscardReason::MissingClientId(message_type));
    }
    match options.value(option_codes::SERVER_ID) {
        None => Err(DiscardReason::MissingServerId(message_type)),
        Some(theirs) => check_server_id(message_type, theirs, server_id),
    }
}

fn check_information_request(options: &Options, server_id: &[u8]) -> Result<(), DiscardReason> {
    let message_type = MessageType::InformationRequest;

    if !options.requested_boot_file_url() {
        return Err(DiscardReason::BootFileUrlNotRequested(message_type));
    }
    if options.has_ia_na() || options.has_ia_ta() {
        return Err(DiscardReason::IaOptionPresent(message_type));
    }
    match options.value(option_codes::SERVER_ID) {
        None => Ok(()),
        Some(theirs) => check_server_id(message_type, theirs, server_id),
    }
}

fn check_server_id(
    message_type: MessageType,
    theirs: &[u8],
    ours: &[u8],
) -> Result<(), DiscardReason> {
    if theirs == ours {
        Ok(())
    } else {
        Err(DiscardReason::ServerIdMismatch {
            message_type,
            theirs: theirs.to_vec(),
            ours: ours.to_vec(),
        })
    }
}
