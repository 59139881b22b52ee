//! GET `/car/name/:name` - exact-match listing by name.
//!
//! An unmatched name is a success with an empty list, not a 404: "no cars
//! named Onix" is an answer, while 404 is reserved for unknown routes and
//! missing identities.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let name = match params::require_path(req, "name") {
        Ok(name) => name,
        Err(e) => return e.to_response(),
    };
    HandlerResponse::from_serialize(200, &store.find_by_name(name))
}
