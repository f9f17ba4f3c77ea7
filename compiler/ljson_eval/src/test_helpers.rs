//! Helpers for writing programs as `serde_json::json!` literals in tests.

#![allow(clippy::unwrap_used)]

use serde_json::Value as Json;

use crate::{new_environment, Environment, EvalError, EvalResult, Value};

/// Convert a JSON literal into a form.
pub fn form(json: Json) -> Value {
    Value::try_from(json).unwrap()
}

/// Evaluate a JSON literal in `env`.
pub fn run_in(env: &Environment, json: Json) -> EvalResult {
    env.eval(&form(json))
}

/// Evaluate a JSON literal in a fresh environment, expecting success.
pub fn eval_ok(json: Json) -> Value {
    let program = json.to_string();
    match run_in(&new_environment(), json) {
        Ok(value) => value,
        Err(err) => panic!("{program} failed: {err}"),
    }
}

/// Evaluate a JSON literal in a fresh environment, expecting failure.
pub fn eval_err(json: Json) -> EvalError {
    let program = json.to_string();
    match run_in(&new_environment(), json) {
        Ok(value) => panic!("{program} succeeded with {value}"),
        Err(err) => err,
    }
}
