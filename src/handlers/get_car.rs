//! GET `/car/:id` - single record by identity.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let id = match params::require_path_integer(req, "id") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };
    match store.find_by_id(id) {
        Some(car) => HandlerResponse::from_serialize(200, &car),
        None => HandlerResponse::not_found(),
    }
}
