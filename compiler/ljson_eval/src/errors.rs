//! Evaluation errors and their centralized constructors.
//!
//! Every failure carries a human-readable message. `EvalErrorKind` keeps the
//! structured data behind the message so hosts and tests can match on the
//! failure mode instead of parsing strings; [`EvalError::category`] groups
//! kinds into the broad families the language distinguishes.
//!
//! Builtins never build `EvalError` by hand. They call the `#[cold]` factory
//! functions below so that "expected X, got Y" wording lives in one place.

use std::fmt;

use crate::value::Value;

/// Result of evaluating a form.
pub type EvalResult = Result<Value, EvalError>;

/// Broad family an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Wrong number of arguments to a form or closure.
    Arity,
    /// An operand had the wrong value kind.
    Type,
    /// A symbol did not resolve to anything callable.
    Resolution,
    /// Raised by the program itself (`throw`, `assert`, `assertEq`).
    User,
    /// An evaluation limit from `EvalConfig` was hit.
    Limit,
    /// The JSON bridge could not represent a value.
    Encoding,
}

/// Structured error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Arity
    ArityMismatch {
        name: String,
        expected: Expected,
        got: usize,
    },

    // Type
    TypeMismatch {
        context: String,
        expected: &'static str,
        got: &'static str,
    },
    NotCallable {
        type_name: &'static str,
    },
    EmptyCallForm,

    // Resolution
    FunctionNotFound {
        name: String,
    },
    EvalNotBound,

    // User
    Thrown {
        message: String,
    },
    AssertionFailed {
        message: String,
    },

    // Limit
    IndirectionLimit {
        name: String,
        limit: usize,
    },
    RecursionLimit {
        limit: usize,
    },
    SequenceLimit {
        limit: usize,
    },

    // Encoding
    Encode {
        message: String,
    },
    Decode {
        message: String,
    },

    /// Anything without a dedicated variant (e.g. malformed `fn` parameters).
    Custom {
        message: String,
    },
}

/// How many arguments a form accepts, for arity messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
    Odd,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Exactly(1) => write!(f, "1 argument"),
            Expected::Exactly(n) => write!(f, "{n} arguments"),
            Expected::AtLeast(1) => write!(f, "at least 1 argument"),
            Expected::AtLeast(n) => write!(f, "at least {n} arguments"),
            Expected::Between(lo, hi) => write!(f, "{lo} to {hi} arguments"),
            Expected::Odd => write!(f, "an odd number of arguments"),
        }
    }
}

impl EvalErrorKind {
    /// The family this kind belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArityMismatch { .. } => ErrorCategory::Arity,
            Self::TypeMismatch { .. }
            | Self::NotCallable { .. }
            | Self::EmptyCallForm
            | Self::Custom { .. } => ErrorCategory::Type,
            Self::FunctionNotFound { .. } | Self::EvalNotBound => ErrorCategory::Resolution,
            Self::Thrown { .. } | Self::AssertionFailed { .. } => ErrorCategory::User,
            Self::IndirectionLimit { .. }
            | Self::RecursionLimit { .. }
            | Self::SequenceLimit { .. } => ErrorCategory::Limit,
            Self::Encode { .. } | Self::Decode { .. } => ErrorCategory::Encoding,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name} expects {expected}, got {got}"),

            Self::TypeMismatch {
                context,
                expected,
                got,
            } => write!(f, "{context}: expected {expected}, got {got}"),
            Self::NotCallable { type_name } => {
                write!(f, "cannot call non-function value of type {type_name}")
            }
            Self::EmptyCallForm => write!(f, "cannot evaluate empty list"),

            Self::FunctionNotFound { name } => write!(f, "function `{name}` not found"),
            Self::EvalNotBound => write!(f, "eval is not bound to a function in this environment"),

            // User text is shown verbatim so `try` hands it back unchanged.
            Self::Thrown { message } | Self::AssertionFailed { message } => {
                write!(f, "{message}")
            }

            Self::IndirectionLimit { name, limit } => write!(
                f,
                "symbol `{name}` did not resolve to a function within {limit} lookups"
            ),
            Self::RecursionLimit { limit } => {
                write!(f, "maximum evaluation depth exceeded (limit: {limit})")
            }
            Self::SequenceLimit { limit } => {
                write!(f, "seq would produce more than {limit} elements")
            }

            Self::Encode { message } => write!(f, "cannot encode value: {message}"),
            Self::Decode { message } => write!(f, "cannot decode value: {message}"),

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message, always `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// The family this error belongs to.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Arity Errors

/// Wrong number of arguments to a form or closure.
#[cold]
pub fn arity_mismatch(name: &str, expected: Expected, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

// Type Errors

/// An operand evaluated to the wrong kind of value.
///
/// `context` names the form and, where useful, the argument position.
#[cold]
pub fn type_mismatch(context: impl Into<String>, expected: &'static str, got: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        context: context.into(),
        expected,
        got: got.type_name(),
    })
}

/// A call form's head resolved to something that is not a function.
#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name(),
    })
}

/// A call form with no head.
#[cold]
pub fn empty_call_form() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCallForm)
}

// Resolution Errors

/// A head symbol has no binding.
#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionNotFound {
        name: name.to_string(),
    })
}

/// `Environment::eval` found no callable under `eval`.
#[cold]
pub fn eval_not_bound() -> EvalError {
    EvalError::from_kind(EvalErrorKind::EvalNotBound)
}

// User Errors

/// Error raised by `throw`.
#[cold]
pub fn thrown(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Thrown {
        message: message.into(),
    })
}

/// Error raised by a failing `assert` or `assertEq`.
#[cold]
pub fn assertion_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        message: message.into(),
    })
}

// Limit Errors

/// Head resolution followed more symbol-to-symbol links than allowed.
#[cold]
pub fn indirection_limit(name: &str, limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndirectionLimit {
        name: name.to_string(),
        limit,
    })
}

/// Nested evaluation went deeper than allowed.
#[cold]
pub fn recursion_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

/// `seq` was asked for more elements than allowed.
#[cold]
pub fn sequence_limit(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::SequenceLimit { limit })
}

// Encoding Errors

/// A value has no JSON representation.
#[cold]
pub fn encode_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Encode {
        message: message.into(),
    })
}

/// JSON input has no value-model representation.
#[cold]
pub fn decode_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Decode {
        message: message.into(),
    })
}
