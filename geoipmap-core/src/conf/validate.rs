use crate::conf::ConfigError;
use crate::conf::types::{GeoipConfig, GeoipmapConfig, IngestConfig, ServerConfig};

impl GeoipmapConfig {
    /// Semantic checks that serde cannot express. Stops at the first error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_geoip(&self.geoip)?;
        validate_ingest(&self.ingest)?;
        Ok(())
    }
}

fn validate_server(cfg: &ServerConfig) -> Result<(), ConfigError> {
    cfg.listen_addr()?;

    if cfg.threads == Some(0) {
        return Err(ConfigError::InvalidThreads);
    }

    Ok(())
}

fn validate_geoip(cfg: &GeoipConfig) -> Result<(), ConfigError> {
    if cfg.city_db.as_os_str().is_empty() {
        return Err(ConfigError::MissingCityDb);
    }

    if cfg.locale.trim().is_empty() {
        return Err(ConfigError::MissingLocale);
    }

    Ok(())
}

fn validate_ingest(cfg: &IngestConfig) -> Result<(), ConfigError> {
    // An empty token is a substring of every line.
    if let Some(index) = cfg.extra_signatures.iter().position(|s| s.is_empty()) {
        return Err(ConfigError::EmptySignature { index });
    }

    Ok(())
}
