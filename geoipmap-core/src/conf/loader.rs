use crate::conf::{ConfigError, GeoipmapConfig};
use std::fs;
use std::path::Path;

/// Picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "geoipmap.hcl";

pub fn load_config(path: &Path) -> Result<GeoipmapConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    parse_config(path, &raw)
}

/// Parse and validate HCL text. `path` is only used in error messages.
pub fn parse_config(path: &Path, raw: &str) -> Result<GeoipmapConfig, ConfigError> {
    let cfg: GeoipmapConfig = hcl::from_str(raw).map_err(|e| ConfigError::parse(path, e))?;

    cfg.validate()?;

    Ok(cfg)
}

/// Load an explicit path, else `geoipmap.hcl` in `dir` if present, else the
/// built-in defaults.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<GeoipmapConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let fallback = dir.join(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        tracing::debug!(path = %fallback.display(), "using config file from working directory");
        return load_config(&fallback);
    }

    tracing::debug!("no config file found, using defaults");
    let cfg = GeoipmapConfig::default();
    cfg.validate()?;
    Ok(cfg)
}
