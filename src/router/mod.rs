//! # Router Module
//!
//! Path matching and route resolution. The route table is an explicit ordered
//! list of `(method, path template, handler name)` tuples built once at
//! startup; matching walks the list in registration order, so when two
//! templates could match the same concrete path the first-registered one wins.
//!
//! Templates use fixed segments and `:name` placeholders (`/car/:id`). A
//! placeholder matches exactly one non-empty segment and never crosses a `/`.
//! Trailing slashes are significant: `/car/` and `/car` are distinct routes.

use http::Method;
use percent_encoding::percent_decode_str;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum number of path/query parameters before heap allocation.
/// Most REST routes have well under 8 parameters.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the dispatch hot path.
///
/// Parameter names use `Arc<str>` because they come from the static route
/// table; values are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
}

/// A parsed URL pattern: fixed segments plus named `:placeholder` segments.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template such as `/car/:id` or `/car/price-range/`.
    ///
    /// Splitting keeps the trailing empty segment, which is what makes
    /// `/car/` a different template from `/car`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .skip(1)
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => Segment::Param(Arc::from(name)),
                None => Segment::Literal(seg.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The template string as registered.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Names of the placeholders, in path order.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_ref()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Two templates are the same shape when their literals agree and their
    /// placeholders sit in the same positions, regardless of placeholder
    /// names. `/car/:id` and `/car/:key` would shadow each other, so the
    /// route table treats them as duplicates.
    fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| match (a, b) {
                    (Segment::Literal(x), Segment::Literal(y)) => x == y,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match a concrete path segment-by-segment, pushing extracted parameters
    /// into `params`. Placeholders never match an empty segment, so `/car/:id`
    /// does not swallow `/car/`.
    ///
    /// Captured values are percent-decoded: `/car/name/Uno%20Mille` yields
    /// `("name", "Uno Mille")`. Decoding happens per segment, after
    /// splitting, so an encoded `%2F` never changes the path shape.
    fn matches(&self, path: &str, params: &mut ParamVec) -> bool {
        let parts: SmallVec<[&str; MAX_INLINE_PARAMS]> = path.split('/').skip(1).collect();
        if parts.len() != self.segments.len() {
            return false;
        }
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        params.clear();
                        return false;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        params.clear();
                        return false;
                    }
                    let value = match percent_decode_str(*part).decode_utf8() {
                        Ok(decoded) => decoded.into_owned(),
                        // Undecodable bytes are kept raw; exact-match lookups
                        // simply find nothing.
                        Err(_) => (*part).to_string(),
                    };
                    params.push((Arc::clone(name), value));
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    template: PathTemplate,
    handler_name: Arc<str>,
}

/// Result of successfully matching a request path to a route.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// HTTP method the route was registered under
    pub method: Method,
    /// The matched template string (e.g. `/car/:id`)
    pub pattern: Arc<str>,
    /// Name of the handler that should process this request
    pub handler_name: String,
    /// Path parameters extracted from the URL (e.g. `:id` → `("id", "123")`)
    pub path_params: ParamVec,
    /// Query string parameters, attached by the server after matching
    pub query_params: ParamVec,
}

impl RouteMatch {
    /// Get a path parameter by name.
    ///
    /// Last write wins: with duplicate names at different depths the deepest
    /// occurrence is returned.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name (last write wins for `?a=1&a=2`).
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Router matching HTTP requests against an ordered route table.
///
/// Registration order is precedence order. The table is built once at startup
/// and never mutated afterwards, so it can be shared behind a plain `Arc` and
/// read concurrently without locking.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a route. Returns `false` (and keeps the existing entry) when a
    /// route with the same method and template shape is already present:
    /// first registration wins, deterministically.
    pub fn register(&mut self, method: Method, template: &str, handler_name: &str) -> bool {
        let template = PathTemplate::parse(template);
        if let Some(existing) = self
            .routes
            .iter()
            .find(|r| r.method == method && r.template.same_shape(&template))
        {
            warn!(
                method = %method,
                template = %template.raw(),
                existing_handler = %existing.handler_name,
                "Duplicate route registration ignored - first registration wins"
            );
            return false;
        }
        info!(
            method = %method,
            template = %template.raw(),
            handler_name = %handler_name,
            "Route registered"
        );
        self.routes.push(Route {
            method,
            template,
            handler_name: Arc::from(handler_name),
        });
        true
    }

    /// Match an HTTP request to a route.
    ///
    /// Returns `None` when no template matches; the server turns that into a
    /// 404 with an empty body.
    #[must_use]
    pub fn route(&self, method: Method, path: &str) -> Option<RouteMatch> {
        debug!(method = %method, path = %path, "Route match attempt");
        let mut params = ParamVec::new();
        for route in &self.routes {
            if route.method != method {
                continue;
            }
            if route.template.matches(path, &mut params) {
                debug!(
                    method = %method,
                    path = %path,
                    route_pattern = %route.template.raw(),
                    handler_name = %route.handler_name,
                    path_params = ?params,
                    "Route matched"
                );
                return Some(RouteMatch {
                    method: route.method.clone(),
                    pattern: Arc::from(route.template.raw()),
                    handler_name: route.handler_name.to_string(),
                    path_params: params,
                    query_params: ParamVec::new(),
                });
            }
        }
        warn!(method = %method, path = %path, "No route matched");
        None
    }

    /// Print all registered routes to stdout. Useful at startup to verify the
    /// table was built in the intended order.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!(
                "[route] {} {} -> {}",
                route.method,
                route.template.raw(),
                route.handler_name
            );
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
