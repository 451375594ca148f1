use std::net::Ipv6Addr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::Duid;
use crate::error::ConfigError;
use crate::response::BootConfig;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/serabut6.conf";
const DEFAULT_PORT: u16 = 547;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to join the DHCPv6 multicast group on and take the MAC from.
    pub interface: Option<String>,
    pub bind_address: Ipv6Addr,
    pub port: u16,
    /// Explicit server DUID; derived from the interface MAC when unset.
    pub server_duid: Option<Duid>,
    pub boot: BootConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interface: None,
            bind_address: Ipv6Addr::UNSPECIFIED,
            port: DEFAULT_PORT,
            server_duid: None,
            boot: BootConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Path of the config file: `SERABUT6_CONFIG` or the default location.
    pub fn default_path() -> PathBuf {
        std::env::var("SERABUT6_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load the config file if it exists, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)?
        } else {
            Self::default()
        };

        if let Ok(val) = std::env::var("SERABUT6_INTERFACE") {
            config.interface = Some(val);
        }
        if let Ok(val) = std::env::var("SERABUT6_PORT") {
            config.port = parse_value("SERABUT6_PORT", &val)?;
        }
        if let Ok(val) = std::env::var("SERABUT6_SERVER_DUID") {
            config.server_duid = Some(Duid::from_hex(&val)?);
        }
        if let Ok(val) = std::env::var("SERABUT6_LOG_LEVEL") {
            config.log_level = val;
        }

        Ok(config)
    }

    /// Parse `key = value` lines; `#` starts a comment line.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config.set(key.trim(), value.trim())?;
            }
        }

        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "interface" => self.interface = Some(value.to_string()),
            "bind_address" => self.bind_address = parse_value(key, value)?,
            "port" => self.port = parse_value(key, value)?,
            "server_duid" => self.server_duid = Some(Duid::from_hex(value)?),
            "address" => self.boot.address = parse_value(key, value)?,
            "preferred_lifetime" => self.boot.preferred_lifetime = parse_value(key, value)?,
            "valid_lifetime" => self.boot.valid_lifetime = parse_value(key, value)?,
            "http_boot_url" => self.boot.http_boot_url = value.to_string(),
            "ipxe_script_url" => self.boot.ipxe_script_url = value.to_string(),
            "vendor_enterprise_number" => {
                self.boot.vendor_enterprise_number = parse_value(key, value)?
            }
            "vendor_class" => self.boot.vendor_class = value.to_string(),
            "force_advertise_type" => self.boot.force_advertise_type = parse_value(key, value)?,
            "log_level" => self.log_level = value.to_string(),
            _ => tracing::warn!("Ignoring unknown config key: {}", key),
        }
        Ok(())
    }

    /// Filter directive for tracing when `RUST_LOG` is not set.
    pub fn tracing_filter(&self) -> String {
        format!("serabut6={0},serabut6d={0}", self.log_level)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
