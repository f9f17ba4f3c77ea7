//! `assert` and `assertEq`.

use super::{check_arity, eval_bool, eval_string, exact};
use crate::environment::Environment;
use crate::errors::{assertion_failed, EvalResult, Expected};
use crate::value::json::encode_lossy;
use crate::value::{NativeFunction, Value};

const DEFAULT_MESSAGE: &str = "assert failed";

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "assert", func: assert },
    NativeFunction { name: "assertEq", func: assert_eq },
];

/// `["assert", cond]` or `["assert", cond, message]`; `null` when it holds.
///
/// The message is evaluated (and must be a string) even when the assertion
/// holds.
fn assert(env: &Environment, args: &[Value]) -> EvalResult {
    check_arity("assert", args, Expected::Between(1, 2))?;
    let Some((cond, rest)) = args.split_first() else {
        return Ok(Value::Null);
    };
    let holds = eval_bool(env, cond, "assert condition")?;
    let message = match rest.first() {
        Some(form) => eval_string(env, form, "assert message")?.to_string(),
        None => DEFAULT_MESSAGE.to_string(),
    };
    if holds {
        Ok(Value::Null)
    } else {
        Err(assertion_failed(message))
    }
}

/// `["assertEq", a, b]`
///
/// On failure the message shows both operands as written, not as evaluated,
/// e.g. `assert failed: ["+",1,1] != 3`.
fn assert_eq(env: &Environment, args: &[Value]) -> EvalResult {
    let [a, b] = exact("assertEq", args)?;
    if env.eval(a)? == env.eval(b)? {
        return Ok(Value::Null);
    }
    Err(assertion_failed(format!(
        "{DEFAULT_MESSAGE}: {} != {}",
        encode_lossy(a),
        encode_lossy(b)
    )))
}
