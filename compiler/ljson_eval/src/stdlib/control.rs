//! Control flow: `if`, `let`, `try`, `throw`.

use super::{check_arity, eval_bool, eval_name, eval_string, exact};
use crate::environment::Environment;
use crate::errors::{thrown, EvalResult, Expected};
use crate::value::{NativeFunction, Value};

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "if", func: if_form },
    NativeFunction { name: "let", func: let_form },
    NativeFunction { name: "try", func: try_form },
    NativeFunction { name: "throw", func: throw },
];

/// `["if", cond, then, else]`: only the chosen branch is evaluated.
fn if_form(env: &Environment, args: &[Value]) -> EvalResult {
    let [cond, then, otherwise] = exact("if", args)?;
    if eval_bool(env, cond, "if condition")? {
        env.eval(then)
    } else {
        env.eval(otherwise)
    }
}

/// `["let", k1, v1, ..., kn, vn, body]`
///
/// Keys and values are evaluated in the new frame, so each binding sees the
/// ones before it.
fn let_form(env: &Environment, args: &[Value]) -> EvalResult {
    check_arity("let", args, Expected::Odd)?;
    let Some((body, bindings)) = args.split_last() else {
        return Ok(Value::Null);
    };

    let frame = env.push();
    for (i, pair) in bindings.chunks_exact(2).enumerate() {
        let [key, value] = pair else {
            continue;
        };
        let name = eval_name(&frame, key, &format!("let key {i}"))?;
        let value = frame.eval(value)?;
        frame.set(&name, value);
    }
    frame.eval(body)
}

/// Turn a failure into `["error", message]`.
fn try_form(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("try", args)?;
    match env.eval(form) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::debug!(category = ?err.category(), message = %err.message, "try caught error");
            Ok(Value::list(vec![
                Value::string("error"),
                Value::string(err.message),
            ]))
        }
    }
}

fn throw(env: &Environment, args: &[Value]) -> EvalResult {
    let [message] = exact("throw", args)?;
    let message = eval_string(env, message, "throw message")?;
    Err(thrown(message.as_str()))
}
