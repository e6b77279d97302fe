use crate::conf::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("embedded asset is missing: {name}")]
    MissingAsset { name: &'static str },

    #[error("could not construct pingora server configuration")]
    ServerConf,

    #[error("failed to create http server")]
    Pingora(#[from] Box<pingora::Error>),
}
