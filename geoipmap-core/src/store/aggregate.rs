use crate::store::Observation;
use ahash::RandomState;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

/// Placed between two page requests accumulated on the same bucket.
pub const PAGE_REQUEST_SEPARATOR: &str = "; <br />";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    #[serde(rename = "country")]
    pub name: String,
    /// Always empty; nothing in the pipeline knows country codes.
    pub code: String,
}

impl Country {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: String::new(),
        }
    }
}

/// Aggregate record for one `(country, city)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityBucket {
    pub country: String,
    pub city: String,
    /// Taken from the first observation, never updated.
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
    #[serde(rename = "ip")]
    pub first_ip: String,
    #[serde(rename = "pagerequest")]
    pub page_requests: String,

    #[serde(skip)]
    last_request: String,
}

impl CityBucket {
    fn new(country: String, city: String, obs: Observation) -> Self {
        Self {
            country,
            city,
            latitude: obs.latitude,
            longitude: obs.longitude,
            count: 1,
            first_ip: obs.ip,
            page_requests: obs.request.clone(),
            last_request: obs.request,
        }
    }

    /// Count one more hit. The request is appended only when it differs from
    /// the last appended one; earlier values are not consulted.
    fn observe(&mut self, request: String) {
        self.count += 1;

        if request != self.last_request {
            self.page_requests.push_str(PAGE_REQUEST_SEPARATOR);
            self.page_requests.push_str(&request);
            self.last_request = request;
        }
    }
}

/// Point-in-time view of everything aggregated so far.
///
/// Serializes to the `/gidata` wire format. Countries are keyed by name and
/// emitted in sorted order; cities keep first-observation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub countries: BTreeMap<String, Country>,
    pub cities: Vec<CityBucket>,
    pub total: u64,
}

/// What a single `record_observation` call did to the bucket list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    NewBucket,
    ExistingBucket,
}

type BucketIndex = HashMap<(String, String), usize, RandomState>;

#[derive(Debug, Default)]
struct StoreState {
    aggregate: Aggregate,
    /// `(country, city)` -> position in `aggregate.cities`
    index: BucketIndex,
}

impl StoreState {
    fn apply(&mut self, mut obs: Observation) -> RecordOutcome {
        let aggregate = &mut self.aggregate;

        if !aggregate.countries.contains_key(&obs.country) {
            aggregate
                .countries
                .insert(obs.country.clone(), Country::named(&obs.country));
        }

        aggregate.total += 1;

        // Identity is exact string equality on both names, no normalization.
        let key = (
            std::mem::take(&mut obs.country),
            std::mem::take(&mut obs.city),
        );

        match self.index.entry(key) {
            Entry::Occupied(slot) => {
                aggregate.cities[*slot.get()].observe(obs.request);
                RecordOutcome::ExistingBucket
            }
            Entry::Vacant(slot) => {
                let (country, city) = slot.key().clone();
                slot.insert(aggregate.cities.len());
                aggregate.cities.push(CityBucket::new(country, city, obs));
                RecordOutcome::NewBucket
            }
        }
    }
}

/// The single piece of mutable shared state.
///
/// Create once, wrap in an `Arc`, and hand clones to the ingest loop and the
/// HTTP boundary.
#[derive(Debug, Default)]
pub struct AggregateStore {
    state: RwLock<StoreState>,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation into the aggregate.
    ///
    /// The country insert, bucket update and `total` increment happen under
    /// one write lock.
    pub fn record_observation(&self, obs: Observation) -> RecordOutcome {
        // Each mutation completes inside the guard, so a poisoned lock still
        // holds a consistent aggregate.
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.apply(obs)
    }

    /// Run `f` against the current aggregate while holding the read lock.
    ///
    /// Keep `f` short: ingest waits for it to return.
    pub fn read<T>(&self, f: impl FnOnce(&Aggregate) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state.aggregate)
    }

    /// Owned copy of the current aggregate.
    pub fn snapshot(&self) -> Aggregate {
        self.read(Aggregate::clone)
    }

    pub fn total(&self) -> u64 {
        self.read(|aggregate| aggregate.total)
    }

    pub fn bucket_count(&self) -> usize {
        self.read(|aggregate| aggregate.cities.len())
    }
}
