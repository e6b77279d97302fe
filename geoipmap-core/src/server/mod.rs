//! HTTP boundary: serves the exported aggregate and the map page.

mod assets;
mod endpoint;
mod error;
mod gateway;
mod pid;
pub mod setup;


pub use assets::{Asset, DEFAULT_TITLE, render_index, resource};
pub use endpoint::MapEndpoint;
pub use error::ServeError;
pub use gateway::MapGateway;
pub use pid::PidFile;
pub use setup::{build_pingora_server, run, spawn_ingest};
