//! Persisted workflow shapes exchanged with the backend.
mod record;
mod workflow;

pub use record::*;
pub use workflow::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts ids sent either as JSON strings or as numbers.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or numeric id, found {}",
            other
        ))),
    }
}

/// Treats `null` as an empty string.
pub(crate) fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
