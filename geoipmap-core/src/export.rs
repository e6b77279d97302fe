//! Serializes the aggregate to the `/gidata` wire format.

use crate::store::AggregateStore;
use std::sync::Arc;

/// Turns the current aggregate into JSON bytes on demand.
///
/// Cheap to clone; every clone shares the same store.
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    store: Arc<AggregateStore>,
}

impl SnapshotExporter {
    pub fn new(store: Arc<AggregateStore>) -> Self {
        Self { store }
    }

    /// Serialize while holding the read lock, so the bytes always describe
    /// one consistent point in time without cloning the aggregate first.
    pub fn export_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        self.store.read(serde_json::to_vec)
    }
}
