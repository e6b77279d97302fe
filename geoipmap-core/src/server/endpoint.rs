use std::str::FromStr;

const RESOURCE_PREFIX: &str = "/resources/";

/// Every path the map server answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEndpoint {
    /// `/`
    Index,
    /// `/gidata`
    Data,
    /// `/resources/<name>`; holds `<name>`.
    Resource(String),
}

impl FromStr for MapEndpoint {
    type Err = &'static str;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path {
            "/" => Ok(MapEndpoint::Index),
            "/gidata" => Ok(MapEndpoint::Data),
            _ => match path.strip_prefix(RESOURCE_PREFIX) {
                Some(name) if !name.is_empty() => Ok(MapEndpoint::Resource(name.to_string())),
                _ => Err("unknown endpoint"),
            },
        }
    }
}
