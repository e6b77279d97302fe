use crate::conf::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Represents the whole configuration file. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeoipmapConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub geoip: GeoipConfig,

    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// e.g. "127.0.0.1:8080"
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Optional page title rendered into the map page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Optional pid file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,

    /// Open the map in the default browser once the listener is up.
    #[serde(default)]
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            title: None,
            threads: None,
            pid_file: None,
            open_browser: false,
        }
    }
}

impl ServerConfig {
    /// Apply command line overrides. A port replaces only the port part of
    /// `listen`, keeping the configured host.
    pub fn apply_overrides(
        &mut self,
        title: Option<String>,
        port: Option<u16>,
    ) -> Result<(), ConfigError> {
        if let Some(title) = title {
            self.title = Some(title);
        }

        if let Some(port) = port {
            let mut addr = self.listen_addr()?;
            addr.set_port(port);
            self.listen = addr.to_string();
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr {
                addr: self.listen.clone(),
            })
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeoipConfig {
    /// MaxMind city database (mmdb).
    #[serde(default = "default_city_db")]
    pub city_db: PathBuf,

    /// Locale key used to pick country and city names.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for GeoipConfig {
    fn default() -> Self {
        Self {
            city_db: default_city_db(),
            locale: default_locale(),
        }
    }
}

fn default_city_db() -> PathBuf {
    PathBuf::from("db/GeoLite2-City.mmdb")
}

fn default_locale() -> String {
    "en".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// The server's own address. Lines whose first address is this one are
    /// never aggregated. `null` disables the check.
    #[serde(default = "default_sentinel_ip")]
    pub sentinel_ip: Option<Ipv4Addr>,

    #[serde(default)]
    pub automated_traffic: AutomatedTrafficPolicy,

    /// Appended to the built-in automated-client signatures.
    #[serde(default)]
    pub extra_signatures: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sentinel_ip: default_sentinel_ip(),
            automated_traffic: AutomatedTrafficPolicy::default(),
            extra_signatures: Vec::new(),
        }
    }
}

pub const DEFAULT_SENTINEL_IP: Ipv4Addr = Ipv4Addr::new(107, 170, 247, 63);

fn default_sentinel_ip() -> Option<Ipv4Addr> {
    Some(DEFAULT_SENTINEL_IP)
}

/// What the ingest loop does with a line from an automated client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomatedTrafficPolicy {
    /// End ingestion for the rest of the process.
    #[default]
    Stop,
    /// Drop the line and keep reading.
    Skip,
}
