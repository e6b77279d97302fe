use crate::geo::Location;

/// One accepted log line: a resolved location plus what was requested from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub country: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Client address exactly as it appeared in the log line.
    pub ip: String,
    /// The quoted request clause, e.g. `GET /about HTTP/1.1`.
    pub request: String,
}

impl Observation {
    pub fn new(location: Location, ip: impl Into<String>, request: impl Into<String>) -> Self {
        Self {
            country: location.country,
            city: location.city,
            latitude: location.latitude,
            longitude: location.longitude,
            ip: ip.into(),
            request: request.into(),
        }
    }
}
