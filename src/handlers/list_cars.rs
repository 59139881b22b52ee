//! GET `/car/` - full or paged listing.
//!
//! Paging is a refinement, not a contract: the paged window
//! `[pageIndex*pageSize, pageIndex*pageSize + pageSize)` is requested only
//! when both parameters are present and valid. A missing or malformed
//! parameter falls back to the full listing - by policy this is defaulting,
//! never a 400.

use tracing::debug;

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let page = match (
        params::optional_query_integer(req, "pageIndex"),
        params::optional_query_integer(req, "pageSize"),
    ) {
        // An offset past i64::MAX addresses nothing a store could hold, so
        // checked_mul overflow falls back to the full listing like any other
        // unusable paging input.
        (Ok(Some(index)), Ok(Some(size))) if index >= 0 && size > 0 => {
            index.checked_mul(size).map(|offset| (offset, size))
        }
        _ => None,
    };

    let cars = match page {
        Some((offset, size)) => {
            debug!(offset, page_size = size, "paged listing");
            store.find_paged(offset as usize, size as usize)
        }
        None => store.find_all(),
    };
    HandlerResponse::from_serialize(200, &cars)
}
