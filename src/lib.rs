//! # Motorcade
//!
//! Motorcade is a small REST service exposing CRUD operations over a car
//! catalog, built on the `may` coroutine runtime and `may_minihttp`.
//!
//! ## Architecture
//!
//! - **[`router`]** - ordered route table with `:name` path templates and
//!   segment-by-segment matching (first registration wins)
//! - **[`dispatcher`]** - coroutine-based handler dispatch over MPSC channels
//!   with panic recovery
//! - **[`params`]** - path/query parameter extraction and numeric coercion
//! - **[`store`]** - the data-access boundary ([`CarStore`]) plus an
//!   in-memory implementation backing the binary and the tests
//! - **[`handlers`]** - one module per endpoint holding its decision logic
//! - **[`server`]** - HTTP transport glue: request parsing, response writing,
//!   the `HttpService` implementation and server lifecycle
//! - **[`middleware`]** - request/response hooks around dispatch
//!
//! ## Request flow
//!
//! 1. `may_minihttp` delivers a raw request to [`server::AppService`]
//! 2. [`server::parse_request`] extracts method, path, query string and body
//! 3. [`router::Router::route`] resolves a handler name and path parameters
//! 4. [`dispatcher::Dispatcher::dispatch`] sends the request to the handler
//!    coroutine and waits on the reply channel
//! 5. the handler applies its endpoint policy, consults the [`CarStore`], and
//!    replies with a [`dispatcher::HandlerResponse`]
//!
//! The route table is immutable after startup and shared via `Arc`, so the
//! whole pipeline is safe to drive from many worker coroutines without
//! internal locking.
//!
//! ## Runtime considerations
//!
//! Handlers run in `may` coroutines, not OS threads. Stack size is
//! configurable via the `MOTORCADE_STACK_SIZE` environment variable (see
//! [`runtime_config::RuntimeConfig`]).

pub mod dispatcher;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod model;
pub mod params;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod store;

pub use model::{Car, CarPayload};
pub use params::ParamError;
pub use store::{CarStore, MemoryCarStore};
