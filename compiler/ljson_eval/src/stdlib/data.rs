//! Builtins over plain data: strings, lists, predicates and conversions.

use super::{check_arity, eval_bool, eval_list, eval_numbers, eval_string, exact};
use crate::environment::Environment;
use crate::errors::{arity_mismatch, sequence_limit, EvalError, EvalResult, Expected};
use crate::eval::resolve_head;
use crate::value::{json, NativeFunction, Value};

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "concat", func: concat },
    NativeFunction { name: "eq", func: eq },
    NativeFunction { name: "not", func: not },
    NativeFunction { name: "isString", func: is_string },
    NativeFunction { name: "isFunction", func: is_function },
    NativeFunction { name: "car", func: car },
    NativeFunction { name: "cdr", func: cdr },
    NativeFunction { name: "intoString", func: into_string },
    NativeFunction { name: "serialize", func: serialize },
    NativeFunction { name: "seq", func: seq },
    NativeFunction { name: "map", func: map },
];

fn concat(env: &Environment, args: &[Value]) -> EvalResult {
    let mut out = String::new();
    for (i, form) in args.iter().enumerate() {
        out.push_str(&eval_string(env, form, &format!("concat argument {i}"))?);
    }
    Ok(Value::string(out))
}

/// Structural equality, see `PartialEq for Value`.
fn eq(env: &Environment, args: &[Value]) -> EvalResult {
    let [a, b] = exact("eq", args)?;
    let a = env.eval(a)?;
    let b = env.eval(b)?;
    Ok(Value::Bool(a == b))
}

fn not(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("not", args)?;
    Ok(Value::Bool(!eval_bool(env, form, "not")?))
}

fn is_string(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("isString", args)?;
    Ok(Value::Bool(matches!(env.eval(form)?, Value::Str(_))))
}

fn is_function(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("isFunction", args)?;
    Ok(Value::Bool(matches!(env.eval(form)?, Value::Callable(_))))
}

/// First element, `null` for an empty list.
fn car(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("car", args)?;
    let items = eval_list(env, form, "car")?;
    Ok(items.first().cloned().unwrap_or(Value::Null))
}

/// Everything after the first element, `null` for an empty list.
fn cdr(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("cdr", args)?;
    let items = eval_list(env, form, "cdr")?;
    Ok(match items.split_first() {
        Some((_, tail)) => Value::list(tail.to_vec()),
        None => Value::Null,
    })
}

fn into_string(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("intoString", args)?;
    Ok(Value::string(env.eval(form)?.display_value()))
}

/// Compact JSON text of the evaluated argument.
fn serialize(env: &Environment, args: &[Value]) -> EvalResult {
    let [form] = exact("serialize", args)?;
    json::encode(&env.eval(form)?).map(Value::string)
}

/// `["seq", to]`, `["seq", from, to]` or `["seq", from, to, step]`.
///
/// Counts from `from` (default 0) up to but excluding `to`, by `step`
/// (default 1). Fails with a limit error when that would exceed
/// `EvalConfig::max_seq_len` elements.
fn seq(env: &Environment, args: &[Value]) -> EvalResult {
    check_arity("seq", args, Expected::Between(1, 3))?;
    let (from, to, step) = match eval_numbers(env, "seq", args)?.as_slice() {
        [to] => (0.0, *to, 1.0),
        [from, to] => (*from, *to, 1.0),
        [from, to, step] => (*from, *to, *step),
        _ => return Err(arity_mismatch("seq", Expected::Between(1, 3), args.len())),
    };
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        return Err(EvalError::new("seq: bounds and step must be finite"));
    }
    if step <= 0.0 {
        return Err(EvalError::new(format!("seq: step must be positive, got {step}")));
    }
    if from > to {
        return Err(EvalError::new(format!(
            "seq: `to` ({to}) is smaller than `from` ({from})"
        )));
    }

    let limit = env.library().config().max_seq_len;
    let count = ((to - from) / step).ceil();
    #[allow(clippy::cast_precision_loss, reason = "limit only bounds the count")]
    let max = limit as f64;
    if count > max {
        return Err(sequence_limit(limit));
    }

    // from + k * step, not a running sum. Past 2^53 neighbouring steps can
    // round to the same double; those repeats are dropped.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "count is finite, non-negative and at most max_seq_len"
    )]
    let count = count as usize;
    let mut items: Vec<Value> = Vec::with_capacity(count);
    let mut last: Option<f64> = None;
    for k in 0..count {
        #[allow(clippy::cast_precision_loss, reason = "k is at most max_seq_len")]
        let n = from + k as f64 * step;
        if n >= to {
            break;
        }
        if last.is_some_and(|prev| n <= prev) {
            continue;
        }
        items.push(Value::Number(n));
        last = Some(n);
    }
    Ok(Value::list(items))
}

/// `["map", f, list]`: call `f` on each element, passed quoted.
fn map(env: &Environment, args: &[Value]) -> EvalResult {
    let [func, list] = exact("map", args)?;
    let func = resolve_head(env, env.eval(func)?)?;
    let items = eval_list(env, list, "map list")?;
    items
        .iter()
        .map(|item| func.call(env, &[Value::quoted(item.clone())]))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::list)
}
