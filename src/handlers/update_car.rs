//! PUT `/car/:id` - replace an existing record's fields.
//!
//! 202 with the replaced record on success; 404 with an empty body when the
//! id does not resolve. The body is validated before the store is consulted,
//! so a malformed payload against a missing id is still a 400.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::model::{Car, CarPayload};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let id = match params::require_path_integer(req, "id") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };
    let payload = match CarPayload::from_body(req.body.as_ref()) {
        Ok(p) => p,
        Err(e) => return e.to_response(),
    };
    if store.replace(id, payload.clone()) {
        HandlerResponse::from_serialize(202, &Car::from_payload(id, payload))
    } else {
        HandlerResponse::not_found()
    }
}
