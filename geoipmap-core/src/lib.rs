pub mod cli;
pub mod conf;
pub mod export;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod server;
pub mod store;
