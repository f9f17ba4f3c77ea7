//! `eval`, `evalAll`, `quote`.

use super::exact;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::eval::{eval_all, evaluate};
use crate::value::{NativeFunction, Value};

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "eval", func: eval },
    NativeFunction { name: "evalAll", func: eval_all_forms },
    NativeFunction { name: "quote", func: quote },
];

/// The dispatcher itself, applied to the raw argument.
fn eval(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("eval", args)?;
    evaluate(env, form)
}

fn eval_all_forms(env: &Environment, args: &[Value]) -> EvalResult {
    eval_all(env, args).map(Value::list)
}

fn quote(_env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("quote", args)?;
    Ok(form.clone())
}
