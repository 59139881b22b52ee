//! Route table and handler registry.
//!
//! The route table mirrors the HTTP surface exactly, including trailing-slash
//! sensitivity: `/car/` (listing) and `/car/price-range/` end in a slash,
//! `/car` (create) does not. Registration order is precedence order.

use std::sync::Arc;

use http::Method;

use crate::dispatcher::Dispatcher;
use crate::handlers;
use crate::router::Router;
use crate::store::CarStore;

/// Build the route table once at startup.
pub fn register_routes(router: &mut Router) {
    router.register(Method::GET, "/car/", "list_cars");
    router.register(Method::GET, "/car/:id", "get_car");
    router.register(Method::GET, "/car/name/:name", "cars_by_name");
    router.register(Method::GET, "/car/brand/:name", "cars_by_brand");
    router.register(Method::GET, "/car/price-range/", "cars_by_price_range");
    router.register(Method::POST, "/car", "create_car");
    router.register(Method::PUT, "/car/:id", "update_car");
    router.register(Method::DELETE, "/car/:id", "delete_car");
}

/// Register every handler coroutine, each capturing the shared store.
///
/// # Safety
///
/// Spawns coroutines via `Dispatcher::register_handler`; the `may` runtime
/// must be initialized first.
pub unsafe fn register_all(dispatcher: &mut Dispatcher, store: Arc<dyn CarStore>) {
    macro_rules! register {
        ($name:literal, $module:ident) => {
            let s = Arc::clone(&store);
            dispatcher.register_handler($name, move |req| {
                let resp = handlers::$module::handle(s.as_ref(), &req);
                let _ = req.reply_tx.send(resp);
            });
        };
    }

    register!("list_cars", list_cars);
    register!("get_car", get_car);
    register!("cars_by_name", cars_by_name);
    register!("cars_by_brand", cars_by_brand);
    register!("cars_by_price_range", cars_by_price_range);
    register!("create_car", create_car);
    register!("update_car", update_car);
    register!("delete_car", delete_car);
}
