//! GET `/car/brand/:name` - exact-match listing by brand. Same empty-list
//! policy as the by-name route.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let brand = match params::require_path(req, "name") {
        Ok(brand) => brand,
        Err(e) => return e.to_response(),
    };
    HandlerResponse::from_serialize(200, &store.find_by_brand(brand))
}
