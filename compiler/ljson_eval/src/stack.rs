//! Stack growth for the recursive evaluator.
//!
//! There is no tail-call elimination, so a deeply nested form or a deeply
//! recursive closure turns directly into native recursion. Every list
//! evaluation goes through `ensure_sufficient_stack`, which grows the stack
//! with `stacker` when the remaining space drops below the red zone. The
//! depth limit in [`EvalConfig`](crate::EvalConfig) bounds how far it grows.

/// Remaining stack below which a new segment is allocated (128KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the native stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
