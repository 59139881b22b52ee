//! POST `/car` - create a record, identity assigned by the store.
//!
//! Responds 201 with the created record so the client learns the assigned id
//! without a follow-up read.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::model::{Car, CarPayload};
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let payload = match CarPayload::from_body(req.body.as_ref()) {
        Ok(p) => p,
        Err(e) => return e.to_response(),
    };
    let id = store.create(payload.clone());
    HandlerResponse::from_serialize(201, &Car::from_payload(id, payload))
}
