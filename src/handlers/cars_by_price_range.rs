//! GET `/car/price-range/` - listing by inclusive manufacturing-value range.
//!
//! Unlike paging on the listing route, both bounds are required: a missing or
//! malformed bound is a 400, never a default-to-all.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let start = match params::require_query_decimal(req, "startPrice") {
        Ok(v) => v,
        Err(e) => return e.to_response(),
    };
    let end = match params::require_query_decimal(req, "finalPrice") {
        Ok(v) => v,
        Err(e) => return e.to_response(),
    };
    HandlerResponse::from_serialize(200, &store.find_by_price_range(start, end))
}
