use std::io;
use std::sync::Arc;

use may_minihttp::{HttpService, Request, Response};
use serde_json::{json, Value};
use tracing::warn;

use super::request::{parse_request, ParsedRequest};
use super::response::{write_handler_response, write_json_error};
use crate::dispatcher::Dispatcher;
use crate::router::Router;

/// The HTTP service: parse, route, dispatch, write.
///
/// Both the router and the dispatcher are immutable after startup, so the
/// service is a pair of `Arc`s and cloning it per worker is cheap. No
/// internal locking - the route table is read-only and dispatch only needs
/// shared references.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(router: Arc<Router>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { router, dispatcher }
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_handler_response(res, 200, json!({ "status": "ok" }));
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            headers,
            query_params,
            body,
        } = parse_request(req);

        if method == "GET" && path == "/health" {
            return health_endpoint(res);
        }

        let method: http::Method = match method.parse() {
            Ok(m) => m,
            Err(_) => {
                write_json_error(res, 400, json!({ "error": "unsupported method" }));
                return Ok(());
            }
        };

        let route_match = match self.router.route(method, &path) {
            Some(m) => m,
            None => {
                // RouteNotFound: 404 with an empty body, same shape as a
                // missing entity - diagnostics go to the log.
                write_handler_response(res, 404, Value::Null);
                return Ok(());
            }
        };

        let mut route_match = route_match;
        route_match.query_params = query_params;

        match self.dispatcher.dispatch(route_match, body, headers) {
            Some(hr) => write_handler_response(res, hr.status, hr.body),
            None => {
                warn!(path = %path, "no handler registered for matched route");
                write_json_error(
                    res,
                    500,
                    json!({ "error": "handler not registered", "path": path }),
                );
            }
        }
        Ok(())
    }
}
