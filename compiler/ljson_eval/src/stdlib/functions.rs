//! Functions and bindings: `fn`, `sym`, `callFn`, `get`.

use super::{check_arity, eval_list, eval_name, exact};
use crate::environment::Environment;
use crate::errors::{type_mismatch, EvalResult, Expected};
use crate::value::{Callable, Closure, NativeFunction, Params, Value};

pub(super) const BUILTINS: &[NativeFunction] = &[
    NativeFunction { name: "fn", func: fn_form },
    NativeFunction { name: "sym", func: sym },
    NativeFunction { name: "callFn", func: call_fn },
    NativeFunction { name: "get", func: get },
];

/// `["fn", [params...], body...]`
///
/// The parameter list is read raw, never evaluated. The closure keeps a
/// handle on `env` itself, not a copy of its bindings.
fn fn_form(env: &Environment, args: &[Value]) -> EvalResult {
    check_arity("fn", args, Expected::AtLeast(1))?;
    let Some((raw_params, body)) = args.split_first() else {
        return Ok(Value::Null);
    };
    let Some(raw_params) = raw_params.as_list() else {
        return Err(type_mismatch("fn parameters", "list", raw_params));
    };
    let closure = Closure {
        env: env.clone(),
        params: Params::parse(raw_params)?,
        body: body.to_vec(),
    };
    Ok(Value::Callable(Callable::closure(closure)))
}

/// A callable that looks `name` up wherever it is called from.
fn sym(env: &Environment, args: &[Value]) -> EvalResult {
    let [name] = exact("sym", args)?;
    let name = eval_name(env, name, "sym name")?;
    Ok(Value::Callable(Callable::symbol(name.as_str())))
}

/// `["callFn", f, args]`: call `f` with the elements of the evaluated list.
///
/// The elements are spliced into a new call form, so they are evaluated once
/// more as arguments; quote them to pass data through untouched.
fn call_fn(env: &Environment, args: &[Value]) -> EvalResult {
    let [func, call_args] = exact("callFn", args)?;
    let call_args = eval_list(env, call_args, "callFn arguments")?;
    let mut form = Vec::with_capacity(call_args.len() + 1);
    form.push(func.clone());
    form.extend(call_args.iter().cloned());
    env.eval(&Value::list(form))
}

/// Raw binding of a name, `null` when unbound. Never resolves further.
fn get(env: &Environment, args: &[Value]) -> EvalResult {
    let [name] = exact("get", args)?;
    let name = eval_name(env, name, "get name")?;
    Ok(env.get(&name))
}
