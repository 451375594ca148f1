//! PXE-specific domain models.

use std::fmt;

/// Client system architecture types from the IANA processor architecture
/// registry (RFC 4578, RFC 5970).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientArch {
    IntelX86Bios,
    NecPc98,
    EfiIa32,
    EfiX64,
    EfiBC,
    EfiArm32,
    EfiArm64,
    EfiIa32Http,
    EfiX64Http,
    EfiArm32Http,
    EfiArm64Http,
    Unknown(u16),
}

impl ClientArch {
    /// Architecture code sent by UEFI x64 firmware doing HTTP boot.
    pub const HTTP_CLIENT: u16 = 0x10;

    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::IntelX86Bios,
            1 => Self::NecPc98,
            6 => Self::EfiIa32,
            7 => Self::EfiX64,
            9 => Self::EfiBC,
            10 => Self::EfiArm32,
            11 => Self::EfiArm64,
            15 => Self::EfiIa32Http,
            16 => Self::EfiX64Http,
            18 => Self::EfiArm32Http,
            19 => Self::EfiArm64Http,
            other => Self::Unknown(other),
        }
    }

    /// Read the architecture from a Client Architecture Type option value.
    ///
    /// Only the first entry of the list is considered. Returns `None` when
    /// the value holds fewer than two bytes.
    pub fn from_option_value(value: &[u8]) -> Option<Self> {
        match value {
            [hi, lo, ..] => Some(Self::from_u16(u16::from_be_bytes([*hi, *lo]))),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            Self::IntelX86Bios => 0,
            Self::NecPc98 => 1,
            Self::EfiIa32 => 6,
            Self::EfiX64 => 7,
            Self::EfiBC => 9,
            Self::EfiArm32 => 10,
            Self::EfiArm64 => 11,
            Self::EfiIa32Http => 15,
            Self::EfiX64Http => 16,
            Self::EfiArm32Http => 18,
            Self::EfiArm64Http => 19,
            Self::Unknown(code) => code,
        }
    }

    /// True only for the code that gets the EFI binary over HTTP.
    pub fn is_http_client(&self) -> bool {
        self.to_u16() == Self::HTTP_CLIENT
    }

    pub fn is_efi(&self) -> bool {
        !matches!(self, Self::IntelX86Bios | Self::NecPc98 | Self::Unknown(_))
    }
}

impl fmt::Display for ClientArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntelX86Bios => write!(f, "x86 BIOS"),
            Self::NecPc98 => write!(f, "NEC/PC98"),
            Self::EfiIa32 => write!(f, "EFI x86"),
            Self::EfiX64 => write!(f, "EFI x64"),
            Self::EfiBC => write!(f, "EFI BC"),
            Self::EfiArm32 => write!(f, "EFI ARM32"),
            Self::EfiArm64 => write!(f, "EFI ARM64"),
            Self::EfiIa32Http => write!(f, "EFI x86 HTTP"),
            Self::EfiX64Http => write!(f, "EFI x64 HTTP"),
            Self::EfiArm32Http => write!(f, "EFI ARM32 HTTP"),
            Self::EfiArm64Http => write!(f, "EFI ARM64 HTTP"),
            Self::Unknown(code) => write!(f, "Unknown({code})"),
        }
    }
}
