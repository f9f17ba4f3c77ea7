//! Callable values: natives, closures, and deferred symbols.
//!
//! All three share one calling convention. A callable receives the caller's
//! environment and the argument forms *unevaluated*, and decides itself what
//! to evaluate and where.

use std::fmt;

use super::{Heap, Value};
use crate::environment::Environment;
use crate::errors::{arity_mismatch, type_mismatch, EvalError, EvalResult, Expected};
use crate::eval::eval_all;

/// Parameter-list entry that marks a closure as variadic.
pub const REST_MARKER: &str = "&rest";

/// Name the surplus arguments of a variadic closure are bound under.
pub const REST_BINDING: &str = "rest";

/// Host function signature shared by every builtin.
pub type NativeFn = fn(&Environment, &[Value]) -> EvalResult;

/// A builtin implemented in Rust.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native {}>", self.name)
    }
}

/// Parameter specification of a closure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Params {
    /// Exactly these parameters.
    Fixed(Vec<String>),
    /// These parameters, then any surplus collected into a list under `rest`.
    Variadic { fixed: Vec<String>, rest: String },
}

impl Params {
    /// Read a raw `fn` parameter list.
    ///
    /// Every entry must be a string. A trailing `&rest` switches to
    /// [`Params::Variadic`]; `&rest` anywhere else is rejected. A variadic
    /// list cannot also name `rest` as a fixed parameter, since the surplus
    /// arguments are bound under that name.
    pub fn parse(raw: &[Value]) -> Result<Self, EvalError> {
        let mut names = Vec::with_capacity(raw.len());
        for (i, entry) in raw.iter().enumerate() {
            let Some(name) = entry.as_str() else {
                return Err(type_mismatch(
                    format!("fn parameter {i}"),
                    "string",
                    entry,
                ));
            };
            names.push(name.to_string());
        }

        let variadic = names.last().is_some_and(|last| last == REST_MARKER);
        if variadic {
            names.pop();
        }
        if names.iter().any(|name| name == REST_MARKER) {
            return Err(EvalError::new(format!(
                "fn: `{REST_MARKER}` must be the last parameter"
            )));
        }
        if variadic && names.iter().any(|name| name == REST_BINDING) {
            return Err(EvalError::new(format!(
                "fn: `{REST_BINDING}` cannot be a parameter of a variadic fn"
            )));
        }

        Ok(if variadic {
            Params::Variadic {
                fixed: names,
                rest: REST_BINDING.to_string(),
            }
        } else {
            Params::Fixed(names)
        })
    }

    /// Names bound positionally.
    pub fn fixed(&self) -> &[String] {
        match self {
            Params::Fixed(names) | Params::Variadic { fixed: names, .. } => names,
        }
    }
}

/// A user-defined function.
///
/// Holds its defining environment by reference, so bindings made in that
/// environment after the closure was created are visible to its body.
pub struct Closure {
    pub env: Environment,
    pub params: Params,
    pub body: Vec<Value>,
}

impl Closure {
    /// Invoke the closure.
    ///
    /// Arguments are evaluated in `caller`, in call order, and bound in a
    /// fresh frame pushed onto the captured environment. The body forms run
    /// in that frame; the last result is returned (`Null` for no body).
    #[tracing::instrument(level = "debug", skip_all, fields(params = ?self.params.fixed()))]
    pub fn invoke(&self, caller: &Environment, args: &[Value]) -> EvalResult {
        let frame = self.env.push();
        match &self.params {
            Params::Fixed(names) => {
                if args.len() != names.len() {
                    return Err(arity_mismatch(
                        "fn",
                        Expected::Exactly(names.len()),
                        args.len(),
                    ));
                }
                for (name, arg) in names.iter().zip(args) {
                    let value = caller.eval(arg)?;
                    frame.set(name, value);
                }
            }
            Params::Variadic { fixed, rest } => {
                if args.len() < fixed.len() {
                    return Err(arity_mismatch(
                        "fn",
                        Expected::AtLeast(fixed.len()),
                        args.len(),
                    ));
                }
                let mut values = eval_all(caller, args)?;
                let surplus = values.split_off(fixed.len());
                for (name, value) in fixed.iter().zip(values) {
                    frame.set(name, value);
                }
                frame.set(rest, Value::list(surplus));
            }
        }

        let mut result = Value::Null;
        for form in &self.body {
            result = frame.eval(form)?;
        }
        Ok(result)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Anything that can sit in the head position of a call form.
#[derive(Clone, Debug)]
pub enum Callable {
    Native(NativeFunction),
    Closure(Heap<Closure>),
    /// Produced by `sym`: looks its name up in the caller's environment at
    /// call time and returns the raw binding.
    Symbol(Heap<String>),
}

impl Callable {
    /// Wrap a closure record.
    pub fn closure(closure: Closure) -> Self {
        Callable::Closure(Heap::new(closure))
    }

    /// Create a deferred lookup of `name`.
    pub fn symbol(name: impl Into<String>) -> Self {
        Callable::Symbol(Heap::new(name.into()))
    }

    /// Call with unevaluated argument forms.
    pub fn call(&self, env: &Environment, args: &[Value]) -> EvalResult {
        match self {
            Callable::Native(native) => (native.func)(env, args),
            Callable::Closure(closure) => closure.invoke(env, args),
            Callable::Symbol(name) => Ok(env.get(name)),
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => a.name == b.name,
            (Callable::Closure(a), Callable::Closure(b)) => Heap::ptr_eq(a, b),
            (Callable::Symbol(a), Callable::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Native(native) => write!(f, "<native {}>", native.name),
            Callable::Closure(closure) => {
                write!(f, "<fn (")?;
                let fixed = closure.params.fixed();
                for (i, name) in fixed.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{name}")?;
                }
                if matches!(closure.params, Params::Variadic { .. }) {
                    if !fixed.is_empty() {
                        write!(f, " ")?;
                    }
                    write!(f, "{REST_MARKER}")?;
                }
                write!(f, ")>")
            }
            Callable::Symbol(name) => write!(f, "<sym {}>", name.as_str()),
        }
    }
}
