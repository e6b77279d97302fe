use geoipmap_core::geo::{Location, TableResolver};
use std::net::Ipv4Addr;
use std::path::Path;

/// Addresses known to [`fixture_resolver`].
pub const LONDON: &str = "81.2.69.142";
pub const LONDON_OTHER: &str = "81.2.69.160";
pub const CHANGCHUN: &str = "175.16.199.1";
pub const SAN_DIEGO: &str = "216.160.83.56";

/// A small stand-in for the city database covering the fixture log.
pub fn fixture_resolver() -> TableResolver {
    TableResolver::new()
        .with(
            Ipv4Addr::new(81, 2, 69, 142),
            Location::new("United Kingdom", "London", 51.5142, -0.0931),
        )
        .with(
            Ipv4Addr::new(81, 2, 69, 160),
            Location::new("United Kingdom", "London", 51.5142, -0.0931),
        )
        .with(
            Ipv4Addr::new(175, 16, 199, 1),
            Location::new("China", "Changchun", 43.88, 125.3228),
        )
        .with(
            Ipv4Addr::new(216, 160, 83, 56),
            Location::new("United States", "San Diego", 32.7157, -117.1611),
        )
}

/// Contents of `fixtures/<name>`.
pub fn access_log(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);

    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}
