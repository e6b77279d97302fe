//! IP -> location resolution.
//!
//! The pipeline only depends on [`GeoResolver`]. Production uses the
//! memory-mapped MaxMind reader; tests and the integration harness use the
//! in-memory [`TableResolver`].

mod error;
mod maxmind;
mod table;

pub use error::GeoError;
pub use maxmind::MaxMindResolver;
pub use table::TableResolver;

use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    /// Empty when the database knows the country but not the city.
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
            latitude,
            longitude,
        }
    }
}

/// Synchronous, possibly slow lookup. `None` means the address is unknown.
pub trait GeoResolver: Send + Sync {
    fn resolve(&self, ip: Ipv4Addr) -> Option<Location>;
}
