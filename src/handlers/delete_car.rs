//! DELETE `/car/:id` - 204 with an empty body on success, 404 with an empty
//! body when the id does not resolve.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::params;
use crate::store::CarStore;

pub fn handle(store: &dyn CarStore, req: &HandlerRequest) -> HandlerResponse {
    let id = match params::require_path_integer(req, "id") {
        Ok(id) => id,
        Err(e) => return e.to_response(),
    };
    if store.delete(id) {
        HandlerResponse::no_content()
    } else {
        HandlerResponse::not_found()
    }
}
