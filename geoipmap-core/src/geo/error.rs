use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("failed to open geoip database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: maxminddb::MaxMindDbError,
    },
}
