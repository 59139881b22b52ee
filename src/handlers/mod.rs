//! Endpoint handlers: one module per route, holding that route's decision
//! logic (parameter policy, store call, status selection). Handlers never
//! panic on bad input; every failure becomes a response.

pub mod cars_by_brand;
pub mod cars_by_name;
pub mod cars_by_price_range;
pub mod create_car;
pub mod delete_car;
pub mod get_car;
pub mod list_cars;
pub mod update_car;
