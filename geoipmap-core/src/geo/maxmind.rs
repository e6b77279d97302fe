use crate::conf::types::GeoipConfig;
use crate::geo::{GeoError, GeoResolver, Location};
use maxminddb::PathElement;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

/// City database lookups through a read-only memory map.
pub struct MaxMindResolver {
    reader: maxminddb::Reader<maxminddb::Mmap>,
    locale: String,
}

impl MaxMindResolver {
    pub fn from_config(cfg: &GeoipConfig) -> Result<Self, GeoError> {
        Self::open(&cfg.city_db, &cfg.locale)
    }

    pub fn open(path: &Path, locale: &str) -> Result<Self, GeoError> {
        // Safety note on the memory-mapped database...
        // - File is opened read-only
        // - Lifetime is bound to MaxMindResolver
        // - geoipmap never writes to the mmdb file
        let reader = unsafe { maxminddb::Reader::open_mmap(path) }.map_err(|source| {
            GeoError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::info!(path = %path.display(), locale, "geoip database loaded");

        Ok(Self {
            reader,
            locale: locale.to_string(),
        })
    }
}

impl GeoResolver for MaxMindResolver {
    fn resolve(&self, ip: Ipv4Addr) -> Option<Location> {
        let lookup = self.reader.lookup(IpAddr::V4(ip)).ok()?;

        // No country name means no usable record.
        let country = lookup
            .decode_path::<String>(&[
                PathElement::Key("country"),
                PathElement::Key("names"),
                PathElement::Key(&self.locale),
            ])
            .ok()
            .flatten()?;

        let city = lookup
            .decode_path::<String>(&[
                PathElement::Key("city"),
                PathElement::Key("names"),
                PathElement::Key(&self.locale),
            ])
            .ok()
            .flatten()
            .unwrap_or_default();

        let latitude = lookup
            .decode_path::<f64>(&[PathElement::Key("location"), PathElement::Key("latitude")])
            .ok()
            .flatten()
            .unwrap_or_default();

        let longitude = lookup
            .decode_path::<f64>(&[PathElement::Key("location"), PathElement::Key("longitude")])
            .ok()
            .flatten()
            .unwrap_or_default();

        Some(Location {
            country,
            city,
            latitude,
            longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::types::GeoipConfig;

    #[test]
    fn missing_database_fails_to_open() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GeoLite2-City.mmdb");

        // Act
        let result = MaxMindResolver::open(&path, "en");

        // Assert
        match result {
            Err(GeoError::Open { path: reported, .. }) => assert_eq!(reported, path),
            Ok(_) => panic!("expected GeoError::Open for {}", path.display()),
        }
    }

    #[test]
    fn garbage_database_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mmdb");
        std::fs::write(&path, b"not a maxmind database").unwrap();

        let cfg = GeoipConfig {
            city_db: path,
            locale: "en".to_string(),
        };

        assert!(matches!(
            MaxMindResolver::from_config(&cfg),
            Err(GeoError::Open { .. })
        ));
    }
}
