//! Bridge between `Value` and JSON.
//!
//! The language has no surface syntax of its own; JSON is the textual form
//! hosts read programs from. The evaluator itself only needs the encoding
//! direction (`serialize`, and the failure message of `assertEq`), but both
//! directions live here so a host never has to hand-convert.
//!
//! Mapping: `null`, booleans, strings and arrays map one-to-one. JSON numbers
//! become `f64`. Whole numbers encode without a fractional part as long as
//! they are exactly representable (|n| <= 2^53). Objects have no counterpart
//! and are rejected; callables and non-finite numbers cannot be encoded.

use serde_json::Value as Json;

use super::Value;
use crate::errors::{decode_error, encode_error, EvalError};

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Parse JSON text into a value.
pub fn decode(text: &str) -> Result<Value, EvalError> {
    let json: Json = serde_json::from_str(text).map_err(|e| decode_error(e.to_string()))?;
    Value::try_from(json)
}

/// Render a value as compact JSON text.
pub fn encode(value: &Value) -> Result<String, EvalError> {
    let json = value.to_json()?;
    serde_json::to_string(&json).map_err(|e| encode_error(e.to_string()))
}

/// Render a form for a diagnostic message.
///
/// Never fails: anything without a JSON shape is written as a JSON string
/// holding its `Display` form.
pub(crate) fn encode_lossy(value: &Value) -> String {
    to_json_lossy(value).to_string()
}

impl Value {
    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> Result<Json, EvalError> {
        match self {
            Value::Null => Ok(Json::Null),
            Value::Bool(b) => Ok(Json::Bool(*b)),
            Value::Number(n) => number_to_json(*n),
            Value::Str(s) => Ok(Json::String(s.to_string())),
            Value::List(items) => items
                .iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array),
            Value::Callable(c) => Err(encode_error(format!("{c} has no JSON form"))),
        }
    }
}

fn to_json_lossy(value: &Value) -> Json {
    match value {
        Value::List(items) => Json::Array(items.iter().map(to_json_lossy).collect()),
        other => other
            .to_json()
            .unwrap_or_else(|_| Json::String(other.to_string())),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "guarded: n is whole and within the exactly representable range"
)]
fn number_to_json(n: f64) -> Result<Json, EvalError> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Ok(Json::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(Json::Number)
        .ok_or_else(|| encode_error(format!("{n} is not a finite number")))
}

impl TryFrom<Json> for Value {
    type Error = EvalError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        match json {
            Json::Null => Ok(Value::Null),
            Json::Bool(b) => Ok(Value::Bool(b)),
            Json::Number(n) => n
                .as_f64()
                .map(Value::Number)
                .ok_or_else(|| decode_error(format!("number {n} does not fit in a double"))),
            Json::String(s) => Ok(Value::string(s)),
            Json::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::list),
            Json::Object(_) => Err(decode_error("JSON objects have no value representation")),
        }
    }
}
