use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the roster server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub server_host: IpAddr,
    /// Optional fixed port; a free port in the fallback range is used otherwise.
    pub server_port: Option<u16>,
    /// Base URL used when building `Location` headers, without a trailing slash.
    pub public_base_url: Option<String>,
    /// Whether the startup dataset is loaded into the roster.
    pub seed_roster: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: None,
            public_base_url: None,
            seed_roster: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            server_host: optional("SERVER_HOST")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_HOST".into()))
                })
                .transpose()?
                .unwrap_or(defaults.server_host),
            server_port: optional("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
            public_base_url: optional("PUBLIC_BASE_URL")
                .map(|value| value.trim().trim_end_matches('/').to_string()),
            seed_roster: optional("ROSTER_SEED")
                .map(|value| {
                    parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue("ROSTER_SEED".into()))
                })
                .transpose()?
                .unwrap_or(defaults.seed_roster),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Install the configuration built at startup, e.g. after command-line overrides.
///
/// The first installed configuration wins; later calls return it unchanged.
pub fn install(config: Config) -> &'static Config {
    tracing::debug!(
        server_host = %config.server_host,
        server_port = ?config.server_port,
        public_base_url = ?config.public_base_url,
        seed_roster = config.seed_roster,
        "Loaded configuration"
    );
    CONFIG.get_or_init(|| config)
}
