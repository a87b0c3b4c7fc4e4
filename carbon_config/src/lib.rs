use std::{
    net::{IpAddr, SocketAddr},
    path::Path,
};

use anyhow::Context;
use carbon_models::email_address::{EmailAddress, EmailAddressWithName};
use config::{File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");
pub const DEV_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.dev.toml");

/// Loads the configuration by layering the given toml files on top of each
/// other. Later files override earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        })?
        .build()
        .context("Failed to merge config files")?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub email: Option<EmailConfig>,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub real_ip: Option<RealIpConfig>,
}

/// Trust the client ip in `header` only for requests coming from `set_from`
/// (e.g. a reverse proxy).
#[derive(Debug, Clone, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of the notification sent for each new submission.
    pub admin_email: Option<EmailAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load(&[DEFAULT_CONFIG_PATH]).unwrap();
        assert!(config.email.is_none());
        assert!(config.contact.admin_email.is_none());
    }

    #[test]
    fn load_dev_config() {
        let config = load(&[DEFAULT_CONFIG_PATH, DEV_CONFIG_PATH]).unwrap();
        assert!(config.email.is_some());
        assert!(config.contact.admin_email.is_some());
    }

    #[test]
    fn missing_file() {
        let result = load(&["/nonexistent/config.toml"]);
        assert!(result.is_err());
    }
}
