//! Arithmetic and numeric comparison.
//!
//! The four operators fold left over any number of arguments: none gives 0,
//! one gives the argument back unchanged (`["-", 5]` is 5, not -5). Division
//! follows IEEE-754, so dividing by zero yields an infinity or NaN.

use super::{eval_number, eval_numbers, exact};
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::value::{NativeFunction, Value};

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "+", func: add },
    NativeFunction { name: "-", func: sub },
    NativeFunction { name: "*", func: mul },
    NativeFunction { name: "/", func: div },
    NativeFunction { name: "<", func: lt },
    NativeFunction { name: "<=", func: le },
    NativeFunction { name: ">", func: gt },
    NativeFunction { name: ">=", func: ge },
];

fn fold(env: &Environment, name: &str, args: &[Value], op: fn(f64, f64) -> f64) -> EvalResult {
    let values = eval_numbers(env, name, args)?;
    let Some((first, rest)) = values.split_first() else {
        return Ok(Value::Number(0.0));
    };
    Ok(Value::Number(rest.iter().fold(*first, |acc, n| op(acc, *n))))
}

fn add(env: &Environment, args: &[Value]) -> EvalResult {
    fold(env, "+", args, |a, b| a + b)
}

fn sub(env: &Environment, args: &[Value]) -> EvalResult {
    fold(env, "-", args, |a, b| a - b)
}

fn mul(env: &Environment, args: &[Value]) -> EvalResult {
    fold(env, "*", args, |a, b| a * b)
}

fn div(env: &Environment, args: &[Value]) -> EvalResult {
    fold(env, "/", args, |a, b| a / b)
}

fn compare(env: &Environment, name: &str, args: &[Value], op: fn(f64, f64) -> bool) -> EvalResult {
    let [a, b] = exact(name, args)?;
    let a = eval_number(env, a, &format!("{name} argument 0"))?;
    let b = eval_number(env, b, &format!("{name} argument 1"))?;
    Ok(Value::Bool(op(a, b)))
}

fn lt(env: &Environment, args: &[Value]) -> EvalResult {
    compare(env, "<", args, |a, b| a < b)
}

fn le(env: &Environment, args: &[Value]) -> EvalResult {
    compare(env, "<=", args, |a, b| a <= b)
}

fn gt(env: &Environment, args: &[Value]) -> EvalResult {
    compare(env, ">", args, |a, b| a > b)
}

fn ge(env: &Environment, args: &[Value]) -> EvalResult {
    compare(env, ">=", args, |a, b| a >= b)
}
