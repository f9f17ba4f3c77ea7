//! The evaluator.
//!
//! Atoms evaluate to themselves, with one exception: a string naming a local
//! binding (anything bound above the library frame) evaluates to that
//! binding, which is how variables are read. A list is a call: its head is
//! followed through symbol bindings until it reaches a callable, and the
//! callable receives the remaining elements unevaluated.

use crate::environment::Environment;
use crate::errors::{
    empty_call_form, function_not_found, indirection_limit, not_callable, EvalError, EvalResult,
};
use crate::stack::ensure_sufficient_stack;
use crate::value::{Callable, Value};

/// Evaluate `form` in `env`.
///
/// This is what the standard `eval` builtin runs. Code that wants to respect
/// a rebound `eval` should go through [`Environment::eval`] instead.
pub fn evaluate(env: &Environment, form: &Value) -> EvalResult {
    match form {
        Value::List(items) => {
            let _depth = env.library().enter()?;
            ensure_sufficient_stack(|| eval_call(env, items))
        }
        Value::Str(name) => Ok(env.lookup_variable(name).unwrap_or_else(|| form.clone())),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Callable(_) => Ok(form.clone()),
    }
}

fn eval_call(env: &Environment, items: &[Value]) -> EvalResult {
    let Some((head, args)) = items.split_first() else {
        return Err(empty_call_form());
    };
    // A string head is already a name; resolution starts from it directly.
    let head = match head {
        Value::Str(_) => head.clone(),
        other => env.eval(other)?,
    };
    let callable = resolve_head(env, head)?;
    callable.call(env, args)
}

/// Follow string heads through `env` until a callable turns up.
///
/// Each string is looked up and replaced by its binding; an unbound name
/// fails, as does any head that is neither a string nor a callable. The
/// number of lookups is capped by `max_indirection`, which turns aliasing
/// cycles into an error naming the symbol resolution started from.
pub(crate) fn resolve_head(env: &Environment, head: Value) -> Result<Callable, EvalError> {
    let limit = env.library().config().max_indirection;
    let origin = match &head {
        Value::Str(name) => Some(name.clone()),
        _ => None,
    };

    let mut current = head;
    let mut lookups = 0;
    loop {
        match current {
            Value::Callable(callable) => return Ok(callable),
            Value::Str(name) => {
                if lookups >= limit {
                    let start = origin.as_ref().map_or(name.as_str(), |o| o.as_str());
                    return Err(indirection_limit(start, limit));
                }
                lookups += 1;
                let next = env.get(&name);
                if next.is_null() {
                    return Err(function_not_found(&name));
                }
                tracing::trace!(name = name.as_str(), resolved = next.type_name(), "head lookup");
                current = next;
            }
            other => return Err(not_callable(&other)),
        }
    }
}

/// Evaluate each form in order, stopping at the first error.
pub(crate) fn eval_all(env: &Environment, forms: &[Value]) -> Result<Vec<Value>, EvalError> {
    forms.iter().map(|form| env.eval(form)).collect()
}

#[cfg(test)]
mod tests;
