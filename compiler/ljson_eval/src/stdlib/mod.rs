//! The standard library: every builtin bound in the library frame.
//!
//! Builtins are special forms in the Lisp sense. Each receives its argument
//! forms unevaluated and evaluates exactly the ones it needs, in the caller's
//! environment. The helpers below cover the common "evaluate, then check the
//! kind" step so that type errors read the same across builtins.

mod arith;
mod assertions;
mod control;
mod data;
mod evaluation;
mod functions;

use rustc_hash::FxHashMap;

use crate::environment::Environment;
use crate::errors::{arity_mismatch, type_mismatch, EvalError, Expected};
use crate::value::{Callable, Heap, NativeFunction, Value};

/// Every standard builtin, keyed by name.
pub(crate) fn standard_library() -> FxHashMap<&'static str, Value> {
    let groups: [&[NativeFunction]; 6] = [
        evaluation::BUILTINS,
        control::BUILTINS,
        functions::BUILTINS,
        arith::BUILTINS,
        data::BUILTINS,
        assertions::BUILTINS,
    ];
    groups
        .into_iter()
        .flatten()
        .map(|native| (native.name, Value::Callable(Callable::Native(*native))))
        .collect()
}

/// Check the argument count without touching the arguments.
fn check_arity(name: &str, args: &[Value], expected: Expected) -> Result<(), EvalError> {
    let n = args.len();
    let ok = match expected {
        Expected::Exactly(count) => n == count,
        Expected::AtLeast(min) => n >= min,
        Expected::Between(lo, hi) => (lo..=hi).contains(&n),
        Expected::Odd => n % 2 == 1,
    };
    if ok {
        Ok(())
    } else {
        Err(arity_mismatch(name, expected, n))
    }
}

/// View exactly `N` argument forms as an array, or fail with an arity error.
fn exact<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N], EvalError> {
    args.try_into()
        .map_err(|_| arity_mismatch(name, Expected::Exactly(N), args.len()))
}

fn eval_bool(env: &Environment, form: &Value, context: &str) -> Result<bool, EvalError> {
    let value = env.eval(form)?;
    value
        .as_bool()
        .ok_or_else(|| type_mismatch(context, "boolean", &value))
}

fn eval_number(env: &Environment, form: &Value, context: &str) -> Result<f64, EvalError> {
    let value = env.eval(form)?;
    value
        .as_number()
        .ok_or_else(|| type_mismatch(context, "number", &value))
}

fn eval_string(env: &Environment, form: &Value, context: &str) -> Result<Heap<String>, EvalError> {
    match env.eval(form)? {
        Value::Str(s) => Ok(s),
        other => Err(type_mismatch(context, "string", &other)),
    }
}

/// A binding name: a literal string is the name itself, anything else must
/// evaluate to a string.
///
/// Literal names are not evaluated, so a name that is already bound (such
/// as `rest` inside a variadic closure) still refers to itself.
fn eval_name(env: &Environment, form: &Value, context: &str) -> Result<Heap<String>, EvalError> {
    match form {
        Value::Str(name) => Ok(name.clone()),
        other => eval_string(env, other, context),
    }
}

fn eval_list(env: &Environment, form: &Value, context: &str) -> Result<Heap<Vec<Value>>, EvalError> {
    match env.eval(form)? {
        Value::List(items) => Ok(items),
        other => Err(type_mismatch(context, "list", &other)),
    }
}

/// Evaluate every form to a number, naming the offending position on error.
fn eval_numbers(env: &Environment, name: &str, forms: &[Value]) -> Result<Vec<f64>, EvalError> {
    forms
        .iter()
        .enumerate()
        .map(|(i, form)| eval_number(env, form, &format!("{name} argument {i}")))
        .collect()
}
