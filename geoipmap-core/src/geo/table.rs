use crate::geo::{GeoResolver, Location};
use ahash::RandomState;
use std::collections::HashMap;
use std::net::Ipv4Addr;

/// Fixed address table. Anything not in the table is unresolved.
#[derive(Debug, Clone, Default)]
pub struct TableResolver {
    entries: HashMap<Ipv4Addr, Location, RandomState>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ip: Ipv4Addr, location: Location) -> Self {
        self.insert(ip, location);
        self
    }

    pub fn insert(&mut self, ip: Ipv4Addr, location: Location) {
        self.entries.insert(ip, location);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Ipv4Addr, Location)> for TableResolver {
    fn from_iter<I: IntoIterator<Item = (Ipv4Addr, Location)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (ip, location) in iter {
            table.insert(ip, location);
        }
        table
    }
}

impl GeoResolver for TableResolver {
    fn resolve(&self, ip: Ipv4Addr) -> Option<Location> {
        self.entries.get(&ip).cloned()
    }
}
