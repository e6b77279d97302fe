//! Access log ingestion.
//!
//! Each line flows through the same steps, one at a time and in order:
//!
//! ```text
//! stdin
//! TrafficClassifier  (automated client -> stop, or skip when configured)
//! LineParser         (no address / sentinel / no request clause -> skip)
//! GeoResolver        (unknown address -> skip)
//! AggregateStore::record_observation
//! ```

mod classifier;
mod parser;
mod pipeline;

#[cfg(test)]
mod tests;

pub use classifier::*;
pub use parser::*;
pub use pipeline::*;
