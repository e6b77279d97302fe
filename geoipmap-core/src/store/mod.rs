//! Shared in-memory aggregate of accepted observations.
//!
//! One writer (the ingest loop) and any number of readers (snapshot exports)
//! share a single [`AggregateStore`]. Every call to
//! [`AggregateStore::record_observation`] is applied inside one exclusive
//! critical section, so a reader never sees a bucket whose count moved
//! without its page requests, or a bucket change without the matching
//! `total` increment.

mod aggregate;
mod observation;

#[cfg(test)]
mod tests;

pub use aggregate::*;
pub use observation::*;
