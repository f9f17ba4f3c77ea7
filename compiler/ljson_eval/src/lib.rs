//! ljson - a small Lisp whose programs are JSON values.
//!
//! There is no surface syntax. A program is a [`Value`] tree, typically
//! decoded from JSON, and the evaluator walks it directly:
//!
//! ```text
//! ["let", "x", 1, "y", ["+", "x", 1], "y"]      => 2
//! [["fn", ["a", "b"], ["+", "a", "b"]], 2, 3]   => 5
//! ["try", ["throw", "boom"]]                    => ["error", "boom"]
//! ```
//!
//! # Architecture
//!
//! - [`Value`]: the closed set of value kinds, shared by code and data
//! - [`Environment`]: chain of frames ending in the immutable [`Library`]
//! - [`evaluate`]: atoms self-evaluate, lists are calls
//! - `stdlib`: the builtins, all receiving unevaluated argument forms
//! - [`EnvironmentBuilder`]: limits ([`EvalConfig`]) and host builtins
//!
//! # Embedding
//!
//! A host creates one root environment per session and feeds it forms:
//!
//! ```text
//! let env = ljson_eval::new_environment();
//! let form = ljson_eval::json::decode(r#"["+", 1, 2]"#)?;
//! let three = env.eval(&form)?;
//! ```

mod builder;
mod environment;
pub mod errors;
mod eval;
mod stack;
mod stdlib;
mod value;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use builder::{new_environment, EnvironmentBuilder, EvalConfig};
pub use environment::{Environment, Library};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult, Expected};
pub use eval::evaluate;
pub use value::{
    json, Callable, Closure, NativeFn, NativeFunction, Params, Value, REST_BINDING, REST_MARKER,
};

/// Environment variable read by [`init_tracing`]; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "LJSON_LOG";

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber for evaluator diagnostics.
///
/// The filter is read from `LJSON_LOG`, or from `RUST_LOG` when that is
/// unset, in `EnvFilter` directive syntax:
///
/// - `ljson_eval=debug`: closure `invoke` spans (with parameter names),
///   errors caught by `try`, library frame setup
/// - `ljson_eval=trace`: additionally every `head lookup` and discarded
///   writes to the library frame
///
/// Returns `true` only from the call that installed the subscriber. Nothing
/// is installed when neither variable is set, on later calls, or when the
/// host already installed a global subscriber.
pub fn init_tracing() -> bool {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let Some(directives) = [LOG_ENV, "RUST_LOG"]
            .into_iter()
            .find_map(|name| std::env::var(name).ok())
        else {
            return;
        };
        installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(EnvFilter::new(directives))
            .try_init()
            .is_ok();
    });
    installed
}
