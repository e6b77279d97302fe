mod aggregate_tests;

use crate::geo::Location;
use crate::store::Observation;

fn observation(country: &str, city: &str, ip: &str, request: &str) -> Observation {
    Observation::new(Location::new(country, city, 10.0, 20.0), ip, request)
}
