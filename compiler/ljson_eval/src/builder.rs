//! Session setup: evaluation limits and the library frame.

use std::env;

use crate::environment::{Environment, Library};
use crate::stdlib::standard_library;
use crate::value::{Callable, NativeFn, NativeFunction, Value};

/// Limits applied to every evaluation in a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum nesting of list evaluations before failing with a
    /// recursion-limit error. Bounds native stack growth, since there is no
    /// tail-call elimination.
    pub max_depth: usize,
    /// Maximum symbol-to-symbol lookups while resolving one call head.
    /// Aliasing cycles (`a -> "b"`, `b -> "a"`) fail once this is reached.
    pub max_indirection: usize,
    /// Maximum number of elements a single `seq` call may produce.
    pub max_seq_len: usize,
}

impl EvalConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 10_000;
    pub const DEFAULT_MAX_INDIRECTION: usize = 64;
    pub const DEFAULT_MAX_SEQ_LEN: usize = 1_000_000;

    /// Defaults overridden by `LJSON_MAX_DEPTH`, `LJSON_MAX_INDIRECTION` and
    /// `LJSON_MAX_SEQ_LEN`.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(EvalConfig {
            max_depth: env_usize("LJSON_MAX_DEPTH")?.unwrap_or(defaults.max_depth),
            max_indirection: env_usize("LJSON_MAX_INDIRECTION")?
                .unwrap_or(defaults.max_indirection),
            max_seq_len: env_usize("LJSON_MAX_SEQ_LEN")?.unwrap_or(defaults.max_seq_len),
        })
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_indirection: Self::DEFAULT_MAX_INDIRECTION,
            max_seq_len: Self::DEFAULT_MAX_SEQ_LEN,
        }
    }
}

fn env_usize(name: &str) -> Result<Option<usize>, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| format!("invalid {name}: {raw}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("invalid {name}: {e}")),
    }
}

/// Builder for a session's root environment.
///
/// ```text
/// let env = EnvironmentBuilder::new()
///     .max_depth(2_000)
///     .native("now", host_now)
///     .build();
/// ```
#[must_use]
pub struct EnvironmentBuilder {
    config: EvalConfig,
    natives: Vec<NativeFunction>,
}

impl EnvironmentBuilder {
    pub fn new() -> Self {
        EnvironmentBuilder {
            config: EvalConfig::default(),
            natives: Vec::new(),
        }
    }

    /// Replace all limits at once.
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn max_indirection(mut self, max_indirection: usize) -> Self {
        self.config.max_indirection = max_indirection;
        self
    }

    pub fn max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.config.max_seq_len = max_seq_len;
        self
    }

    /// Add a host builtin to the library frame.
    ///
    /// Host builtins follow the same convention as the standard ones: they
    /// receive unevaluated argument forms. A name that is already a standard
    /// builtin is replaced.
    pub fn native(mut self, name: &'static str, func: NativeFn) -> Self {
        self.natives.push(NativeFunction { name, func });
        self
    }

    /// Build the library frame and return a fresh top-level frame above it.
    pub fn build(self) -> Environment {
        let mut bindings = standard_library();
        for native in self.natives {
            bindings.insert(native.name, Value::Callable(Callable::Native(native)));
        }
        tracing::debug!(
            builtins = bindings.len(),
            max_depth = self.config.max_depth,
            max_indirection = self.config.max_indirection,
            max_seq_len = self.config.max_seq_len,
            "building library frame"
        );
        Environment::library_root(Library::new(bindings, self.config)).push()
    }
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh top-level environment over the standard library, default limits.
pub fn new_environment() -> Environment {
    EnvironmentBuilder::new().build()
}
