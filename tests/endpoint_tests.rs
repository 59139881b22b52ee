mod common;

use std::sync::Arc;

use http::Method;
use serde_json::{json, Value};

use common::test_runtime::setup_may_runtime;
use motorcade::dispatcher::{Dispatcher, HandlerResponse, HeaderVec};
use motorcade::registry;
use motorcade::router::Router;
use motorcade::server::parse_query_params;
use motorcade::store::MemoryCarStore;

/// A routing + dispatch stack over the seeded in-memory fleet.
fn service() -> (Router, Dispatcher) {
    setup_may_runtime();

    let store: Arc<dyn motorcade::store::CarStore> = Arc::new(MemoryCarStore::with_demo_fleet());
    let mut router = Router::new();
    registry::register_routes(&mut router);
    let mut dispatcher = Dispatcher::new();
    unsafe {
        registry::register_all(&mut dispatcher, store);
    }
    (router, dispatcher)
}

/// Route and dispatch a request against the stack, the way the HTTP service
/// does. `target` may carry a query string.
fn request(
    router: &Router,
    dispatcher: &Dispatcher,
    method: Method,
    target: &str,
    body: Option<Value>,
) -> Option<HandlerResponse> {
    let path = target.split('?').next().unwrap_or(target);
    let mut route = router.route(method, path)?;
    route.query_params = parse_query_params(target);
    dispatcher.dispatch(route, body, HeaderVec::new())
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|c| c["name"].as_str().expect("name field"))
        .collect()
}

#[test]
fn test_full_listing_returns_whole_fleet() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::GET, "/car/", None).expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(
        names(&resp.body),
        vec!["Diablo", "Enzo", "F50", "Uno Mille", "x1", "x5"]
    );
}

#[test]
fn test_paged_listing_window() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/?pageIndex=0&pageSize=2",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(names(&resp.body), vec!["Diablo", "Enzo"]);

    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/?pageIndex=2&pageSize=2",
        None,
    )
    .expect("response");
    assert_eq!(names(&resp.body), vec!["x1", "x5"]);
}

#[test]
fn test_incomplete_paging_falls_back_to_full_listing() {
    let (router, dispatcher) = service();
    // Only one of the two paging parameters present.
    let resp = request(&router, &dispatcher, Method::GET, "/car/?pageIndex=5", None)
        .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body.as_array().expect("array body").len(), 6);
}

#[test]
fn test_malformed_paging_falls_back_to_full_listing() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/?pageIndex=0&pageSize=abc",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body.as_array().expect("array body").len(), 6);
}

#[test]
fn test_huge_paging_window_falls_back_to_full_listing() {
    let (router, dispatcher) = service();
    // pageIndex * pageSize exceeds i64; valid input must never take the
    // panic path.
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/?pageIndex=4611686018427387904&pageSize=4",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body.as_array().expect("array body").len(), 6);
}

#[test]
fn test_get_by_id() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::GET, "/car/3", None).expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["id"], 3);
    assert_eq!(resp.body["name"], "F50");
    assert_eq!(resp.body["manufacturingValue"], 2_900_000.0);
}

#[test]
fn test_get_unknown_id_is_empty_404() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::GET, "/car/6767", None).expect("response");
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, Value::Null);
}

#[test]
fn test_get_non_numeric_id_is_400() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::GET, "/car/abc", None).expect("response");
    assert_eq!(resp.status, 400);
    assert!(resp.body["error"].is_string());
}

#[test]
fn test_search_by_name() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::GET, "/car/name/x5", None).expect("response");
    assert_eq!(resp.status, 200);
    let cars = resp.body.as_array().expect("array body");
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["brand"], "BMW");
}

#[test]
fn test_search_by_encoded_name() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/name/Uno%20Mille",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(names(&resp.body), vec!["Uno Mille"]);
}

#[test]
fn test_search_by_unknown_name_is_empty_list() {
    let (router, dispatcher) = service();
    let resp =
        request(&router, &dispatcher, Method::GET, "/car/name/Onix", None).expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!([]));
}

#[test]
fn test_search_by_brand() {
    let (router, dispatcher) = service();
    let resp =
        request(&router, &dispatcher, Method::GET, "/car/brand/Ferrari", None).expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(names(&resp.body), vec!["Enzo", "F50"]);

    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/brand/TestNonExistent",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!([]));
}

#[test]
fn test_price_range_is_inclusive() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/price-range/?startPrice=9500&finalPrice=110000",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(names(&resp.body), vec!["Uno Mille"]);
}

#[test]
fn test_empty_price_range_is_empty_list() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/price-range/?startPrice=0&finalPrice=1",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, json!([]));
}

#[test]
fn test_price_range_requires_both_bounds() {
    let (router, dispatcher) = service();
    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/price-range/?startPrice=100",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 400);

    let resp = request(
        &router,
        &dispatcher,
        Method::GET,
        "/car/price-range/?startPrice=cheap&finalPrice=100",
        None,
    )
    .expect("response");
    assert_eq!(resp.status, 400);
}

#[test]
fn test_create_then_fetch() {
    let (router, dispatcher) = service();
    let payload = json!({
        "name": "Civic",
        "brand": "Honda",
        "manufacturingValue": 120_000.0,
        "description": "compact sedan"
    });
    let resp = request(&router, &dispatcher, Method::POST, "/car", Some(payload))
        .expect("response");
    assert_eq!(resp.status, 201);
    assert_eq!(resp.body["id"], 7);
    assert_eq!(resp.body["name"], "Civic");

    let resp = request(&router, &dispatcher, Method::GET, "/car/7", None).expect("response");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["brand"], "Honda");
}

#[test]
fn test_create_rejects_missing_or_invalid_body() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::POST, "/car", None).expect("response");
    assert_eq!(resp.status, 400);

    let negative = json!({
        "name": "Civic",
        "brand": "Honda",
        "manufacturingValue": -1.0,
        "description": ""
    });
    let resp = request(&router, &dispatcher, Method::POST, "/car", Some(negative))
        .expect("response");
    assert_eq!(resp.status, 400);
}

#[test]
fn test_replace_is_accepted_with_record() {
    let (router, dispatcher) = service();
    let payload = json!({
        "name": "Diablo SV",
        "brand": "Lamborghini",
        "manufacturingValue": 520_000.0,
        "description": "updated trim"
    });
    let resp = request(&router, &dispatcher, Method::PUT, "/car/1", Some(payload))
        .expect("response");
    assert_eq!(resp.status, 202);
    assert_eq!(resp.body["id"], 1);
    assert_eq!(resp.body["name"], "Diablo SV");

    let resp = request(&router, &dispatcher, Method::GET, "/car/1", None).expect("response");
    assert_eq!(resp.body["name"], "Diablo SV");
}

#[test]
fn test_replace_unknown_id_is_empty_404() {
    let (router, dispatcher) = service();
    let payload = json!({
        "name": "Ghost",
        "brand": "None",
        "manufacturingValue": 1.0,
        "description": ""
    });
    let resp = request(&router, &dispatcher, Method::PUT, "/car/6767", Some(payload))
        .expect("response");
    assert_eq!(resp.status, 404);
    assert_eq!(resp.body, Value::Null);
}

#[test]
fn test_delete_then_miss() {
    let (router, dispatcher) = service();
    let resp = request(&router, &dispatcher, Method::DELETE, "/car/2", None).expect("response");
    assert_eq!(resp.status, 204);
    assert_eq!(resp.body, Value::Null);

    let resp = request(&router, &dispatcher, Method::DELETE, "/car/2", None).expect("response");
    assert_eq!(resp.status, 404);

    let resp = request(&router, &dispatcher, Method::GET, "/car/2", None).expect("response");
    assert_eq!(resp.status, 404);
}
