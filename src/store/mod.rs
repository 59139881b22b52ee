//! The data-access boundary.
//!
//! The routing/extraction/response core never builds storage queries itself;
//! it only calls this interface. [`MemoryCarStore`] is the in-process
//! implementation used by the binary and the test suite.

mod memory;

pub use memory::MemoryCarStore;

use crate::model::{Car, CarPayload};

/// Query and mutation interface over car records.
///
/// Implementations must keep single-record mutations atomic: the core may be
/// driven by many worker coroutines concurrently and must never observe a
/// partially-written record.
pub trait CarStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Option<Car>;
    /// Exact-match on name; an empty result is a normal outcome.
    fn find_by_name(&self, name: &str) -> Vec<Car>;
    /// Exact-match on brand; an empty result is a normal outcome.
    fn find_by_brand(&self, brand: &str) -> Vec<Car>;
    fn find_all(&self) -> Vec<Car>;
    /// Records in `[offset, offset + limit)` of the id-ordered listing.
    fn find_paged(&self, offset: usize, limit: usize) -> Vec<Car>;
    /// Records whose manufacturing value lies in `[min, max]` inclusive.
    fn find_by_price_range(&self, min: f64, max: f64) -> Vec<Car>;
    /// Insert a new record and return its assigned identity.
    fn create(&self, payload: CarPayload) -> i64;
    /// Replace the record at `id`; `false` when no such record exists.
    fn replace(&self, id: i64, payload: CarPayload) -> bool;
    /// Delete the record at `id`; `false` when no such record exists.
    fn delete(&self, id: i64) -> bool;
}
