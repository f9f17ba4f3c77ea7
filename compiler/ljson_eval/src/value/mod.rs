//! Runtime values.
//!
//! Programs and data share one representation: the same `Value` that a host
//! decodes from JSON is what the evaluator walks as code. The set of kinds is
//! closed, and every builtin matches on it exhaustively.
//!
//! Heap kinds (`Str`, `List`) are created through factory methods only:
//!
//! ```text
//! let s = Value::string("hello");
//! let form = Value::list(vec![Value::string("+"), Value::Number(1.0)]);
//! ```

mod callable;
mod heap;
pub mod json;

use std::fmt;

pub use callable::{Callable, Closure, NativeFn, NativeFunction, Params, REST_BINDING, REST_MARKER};
pub use heap::Heap;

/// A runtime value, which is also a program form.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absence of a value; also what lookups of unbound names return.
    Null,
    /// Boolean value.
    Bool(bool),
    /// IEEE-754 double.
    Number(f64),
    /// UTF-8 string. As a call head it names a binding.
    Str(Heap<String>),
    /// Ordered heterogeneous list. As a form it is a call.
    List(Heap<Vec<Value>>),
    /// Native function, closure, or deferred symbol.
    Callable(Callable),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a `quote` form wrapping `value`, so evaluating it yields `value`.
    pub fn quoted(value: Value) -> Self {
        Value::list(vec![Value::string("quote"), value])
    }
}

// Value Methods

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Kind name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Callable(_) => "function",
        }
    }

    /// Plain-text rendering used by `intoString`.
    ///
    /// Strings come out without quotes; lists fall back to their `Display`
    /// form since they have no other textual shape.
    pub fn display_value(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Str(s) => s.to_string(),
            Value::List(_) => self.to_string(),
            Value::Callable(_) => "[ FUNCTION ]".to_string(),
        }
    }
}

/// Render a number the way the language prints it: whole values have no
/// fractional part (`10`, not `10.0`).
pub(crate) fn format_number(n: f64) -> String {
    // f64's Display already omits a zero fraction and never uses exponents.
    n.to_string()
}

/// Structural equality over the whole value model.
///
/// Numbers compare by IEEE equality (so `NaN != NaN`). Callables compare by
/// identity: two natives are equal when they are the same builtin, two
/// closures when they are the same closure value.
impl PartialEq for Value {
    #[allow(clippy::float_cmp, reason = "eq is exact IEEE equality")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Callable(c) => write!(f, "{c}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}
