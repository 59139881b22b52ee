//! The car resource and its client-supplied payload.
//!
//! Wire field names are fixed by the HTTP contract: `id`, `name`, `brand`,
//! `manufacturingValue`, `description`.

use crate::params::ParamError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog record. Immutable once constructed; the only mutations the
/// service offers are replace-by-id and delete-by-id through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    /// Identity assigned by the store
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Non-negative currency amount
    pub manufacturing_value: f64,
    pub description: String,
}

impl Car {
    #[must_use]
    pub fn from_payload(id: i64, payload: CarPayload) -> Self {
        Self {
            id,
            name: payload.name,
            brand: payload.brand,
            manufacturing_value: payload.manufacturing_value,
            description: payload.description,
        }
    }
}

/// The client-supplied fields of a car: everything but the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    pub name: String,
    pub brand: String,
    pub manufacturing_value: f64,
    pub description: String,
}

impl CarPayload {
    /// Parse and validate a request body. Absent body, malformed JSON, and
    /// invariant violations all surface as [`ParamError`] so the endpoint
    /// answers 400 instead of crashing.
    pub fn from_body(body: Option<&Value>) -> Result<Self, ParamError> {
        let value = body.ok_or(ParamError::Missing("body"))?;
        let payload: CarPayload = serde_json::from_value(value.clone())
            .map_err(|e| ParamError::InvalidBody(e.to_string()))?;
        if !payload.manufacturing_value.is_finite() || payload.manufacturing_value < 0.0 {
            return Err(ParamError::InvalidBody(format!(
                "manufacturingValue must be a non-negative amount, got {}",
                payload.manufacturing_value
            )));
        }
        Ok(payload)
    }
}
