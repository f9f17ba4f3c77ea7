//! Lexical environments.
//!
//! An environment is a singly-linked chain of frames. Every chain ends in a
//! [`Library`] frame that owns the builtins and ignores writes; everything
//! above it is a mutable `Scope`. Frames are reference counted, so a frame
//! lives exactly as long as an evaluation or a closure still points at it.

use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::builder::EvalConfig;
use crate::errors::{eval_not_bound, recursion_limit, EvalError, EvalResult};
use crate::value::Value;

/// Single-threaded shared frame: `Rc<RefCell<T>>` behind a factory.
///
/// Frames are never shared across threads; an environment chain supports one
/// evaluation in flight at a time, and `Rc` makes the compiler enforce it.
#[repr(transparent)]
pub(crate) struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The immutable root frame holding the builtins.
pub struct Library {
    bindings: FxHashMap<&'static str, Value>,
    config: EvalConfig,
    /// Current nesting of list evaluations across the whole session.
    depth: Cell<usize>,
}

impl Library {
    pub(crate) fn new(bindings: FxHashMap<&'static str, Value>, config: EvalConfig) -> Self {
        Library {
            bindings,
            config,
            depth: Cell::new(0),
        }
    }

    /// Look up a builtin; `Null` when there is none.
    pub fn get(&self, name: &str) -> Value {
        self.bindings.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Names of every builtin, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.keys().copied()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Record one more level of nested evaluation.
    ///
    /// The returned guard gives the level back when dropped, on success and
    /// error paths alike.
    pub(crate) fn enter(&self) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get();
        if depth >= self.config.max_depth {
            return Err(recursion_limit(self.config.max_depth));
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

/// Decrements the session depth counter on drop.
pub(crate) struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// A mutable frame with local bindings.
pub(crate) struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Environment,
}

#[derive(Clone)]
enum Frame {
    Library,
    Scope(LocalScope<Scope>),
}

/// Handle to the innermost frame of a chain.
///
/// Cloning is cheap and shares the frame: a binding made through one handle
/// is visible through every clone.
#[derive(Clone)]
pub struct Environment {
    frame: Frame,
    library: Rc<Library>,
}

impl Environment {
    /// An environment that is just the library frame.
    pub(crate) fn library_root(library: Library) -> Self {
        Environment {
            frame: Frame::Library,
            library: Rc::new(library),
        }
    }

    /// Look up `name`, walking outwards; `Null` when nothing binds it.
    pub fn get(&self, name: &str) -> Value {
        self.lookup_variable(name)
            .unwrap_or_else(|| self.library.get(name))
    }

    /// Look up `name` in the scope frames only, stopping at the library.
    ///
    /// A bare string in value position resolves against this: local bindings
    /// replace the string, builtin names do not.
    pub fn lookup_variable(&self, name: &str) -> Option<Value> {
        let mut frame = self.frame.clone();
        loop {
            let parent = match &frame {
                Frame::Library => return None,
                Frame::Scope(scope) => {
                    let scope = scope.borrow();
                    if let Some(value) = scope.bindings.get(name) {
                        return Some(value.clone());
                    }
                    scope.parent.frame.clone()
                }
            };
            frame = parent;
        }
    }

    /// Bind `name` in this frame only.
    ///
    /// Returns `true` when an existing local binding was replaced. Ancestors
    /// are never written, so this can shadow but not mutate outer bindings.
    /// On the library frame the value is discarded and `false` is returned.
    pub fn set(&self, name: &str, value: Value) -> bool {
        match &self.frame {
            Frame::Library => {
                tracing::trace!(name, "write to library frame discarded");
                false
            }
            Frame::Scope(scope) => scope
                .borrow_mut()
                .bindings
                .insert(name.to_string(), value)
                .is_some(),
        }
    }

    /// New empty frame whose parent is this one.
    #[must_use]
    pub fn push(&self) -> Environment {
        let scope = Scope {
            bindings: FxHashMap::default(),
            parent: self.clone(),
        };
        Environment {
            frame: Frame::Scope(LocalScope::new(scope)),
            library: Rc::clone(&self.library),
        }
    }

    /// Evaluate `form` with whatever is bound to `eval` in this environment.
    ///
    /// Normally that is the builtin dispatcher; binding another callable
    /// under `eval` swaps the evaluator for everything beneath this frame.
    pub fn eval(&self, form: &Value) -> EvalResult {
        match self.get("eval") {
            Value::Callable(evaluator) => evaluator.call(self, std::slice::from_ref(form)),
            _ => Err(eval_not_bound()),
        }
    }

    /// The library frame at the root of this chain.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The enclosing environment; `None` for the library frame.
    pub fn parent(&self) -> Option<Environment> {
        match &self.frame {
            Frame::Library => None,
            Frame::Scope(scope) => Some(scope.borrow().parent.clone()),
        }
    }

    /// Number of frames from here to the library, the library included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }

    /// Whether this handle points at the library frame itself.
    pub fn is_library(&self) -> bool {
        matches!(self.frame, Frame::Library)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.frame {
            Frame::Library => f.write_str("Environment(library)"),
            Frame::Scope(scope) => {
                let scope = scope.borrow();
                let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
                names.sort_unstable();
                f.debug_struct("Environment")
                    .field("depth", &self.depth())
                    .field("locals", &names)
                    .finish()
            }
        }
    }
}

#[cfg(test)]
mod tests;
