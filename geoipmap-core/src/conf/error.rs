use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Server
    //-------------------------------------------------------------------------
    #[error("invalid listen socket address '{addr}'")]
    InvalidListenAddr { addr: String },

    #[error("server threads must be greater than zero")]
    InvalidThreads,

    //-------------------------------------------------------------------------
    // GeoIP
    //-------------------------------------------------------------------------
    #[error("geoip city_db must not be empty")]
    MissingCityDb,

    #[error("geoip locale must not be empty")]
    MissingLocale,

    //-------------------------------------------------------------------------
    // Ingest
    //-------------------------------------------------------------------------
    #[error("ingest extra_signatures[{index}] is empty")]
    EmptySignature { index: usize },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
