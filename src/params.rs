//! Parameter extraction and coercion.
//!
//! Lookup never fails for an absent optional parameter - callers decide
//! whether `Missing` means "use a default" or "bad request", per endpoint
//! policy. Numeric coercion on a present-but-malformed value yields
//! [`ParamError::InvalidFormat`], which endpoints translate into a 400
//! response; nothing here panics or propagates past the dispatcher.

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use thiserror::Error;

/// Parameter and body failures recoverable at the endpoint boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    /// A required parameter was absent.
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),
    /// A parameter was present but failed numeric coercion.
    #[error("parameter `{name}` has invalid format: `{value}`")]
    InvalidFormat { name: &'static str, value: String },
    /// The request body was absent, not valid JSON for the expected shape,
    /// or violated a field invariant.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ParamError {
    /// Every parameter error maps to a 400 with a diagnostic body.
    #[must_use]
    pub fn to_response(&self) -> HandlerResponse {
        HandlerResponse::bad_request(&self.to_string())
    }
}

/// Coerce a raw string to an integer.
pub fn as_integer(name: &'static str, raw: &str) -> Result<i64, ParamError> {
    raw.parse::<i64>().map_err(|_| ParamError::InvalidFormat {
        name,
        value: raw.to_string(),
    })
}

/// Coerce a raw string to a decimal. Non-finite values ("NaN", "inf") are
/// rejected - a currency amount is always a finite number.
pub fn as_decimal(name: &'static str, raw: &str) -> Result<f64, ParamError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParamError::InvalidFormat {
            name,
            value: raw.to_string(),
        }),
    }
}

/// A path parameter that the route template guarantees, as a string.
pub fn require_path<'a>(req: &'a HandlerRequest, name: &'static str) -> Result<&'a str, ParamError> {
    req.get_path_param(name).ok_or(ParamError::Missing(name))
}

/// A required integer path parameter (`/car/:id`).
pub fn require_path_integer(req: &HandlerRequest, name: &'static str) -> Result<i64, ParamError> {
    as_integer(name, require_path(req, name)?)
}

/// An optional integer query parameter: absent is `Ok(None)`, present but
/// malformed is an error the caller may treat as a default or a 400.
pub fn optional_query_integer(
    req: &HandlerRequest,
    name: &'static str,
) -> Result<Option<i64>, ParamError> {
    match req.get_query_param(name) {
        None => Ok(None),
        Some(raw) => as_integer(name, raw).map(Some),
    }
}

/// A required decimal query parameter: absent is `Missing`, malformed is
/// `InvalidFormat` - both 400s for endpoints that require the parameter.
pub fn require_query_decimal(
    req: &HandlerRequest,
    name: &'static str,
) -> Result<f64, ParamError> {
    match req.get_query_param(name) {
        None => Err(ParamError::Missing(name)),
        Some(raw) => as_decimal(name, raw),
    }
}
