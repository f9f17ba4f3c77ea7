#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::{new_environment, EnvironmentBuilder};
use pretty_assertions::assert_eq;

#[test]
fn test_get_set() {
    let env = new_environment();
    assert!(!env.set("a", Value::Number(2.0)));
    assert_eq!(env.get("a"), Value::Number(2.0));
    assert_eq!(env.push().get("a"), Value::Number(2.0));
}

#[test]
fn test_set_reports_replacement() {
    let env = new_environment();
    assert!(!env.set("x", Value::Number(1.0)));
    assert!(env.set("x", Value::Number(2.0)));
    assert_eq!(env.get("x"), Value::Number(2.0));
}

#[test]
fn test_unknown_name_is_null() {
    let env = new_environment();
    assert_eq!(env.get("no-such-binding"), Value::Null);
    assert_eq!(env.push().push().get("no-such-binding"), Value::Null);
}

#[test]
fn test_set_never_writes_through() {
    let outer = new_environment();
    outer.set("x", Value::Number(1.0));

    let inner = outer.push();
    // Shadowing, not mutation: the outer binding is untouched.
    assert!(!inner.set("x", Value::Number(2.0)));
    assert_eq!(inner.get("x"), Value::Number(2.0));
    assert_eq!(outer.get("x"), Value::Number(1.0));
}

#[test]
fn test_push_starts_empty_and_sees_parent() {
    let outer = new_environment();
    outer.set("y", Value::string("outer"));
    let inner = outer.push();
    assert_eq!(inner.get("y"), Value::string("outer"));
    assert_eq!(inner.depth(), outer.depth() + 1);
}

#[test]
fn test_library_frame_rejects_writes() {
    let env = new_environment();
    let mut root = env.clone();
    while let Some(parent) = root.parent() {
        root = parent;
    }
    assert!(root.is_library());

    assert!(!root.set("x", Value::Number(1.0)));
    assert_eq!(root.get("x"), Value::Null);

    // Existing builtins are not replaced either.
    let before = root.get("car");
    assert!(!root.set("car", Value::Null));
    assert_eq!(root.get("car"), before);
    assert_eq!(root.depth(), 1);
}

#[test]
fn test_library_frame_still_evaluates() {
    let root = Environment::library_root(Library::new(
        crate::stdlib::standard_library(),
        EvalConfig::default(),
    ));
    let form = Value::list(vec![
        Value::string("+"),
        Value::Number(1.0),
        Value::Number(2.0),
    ]);
    assert_eq!(root.eval(&form).unwrap(), Value::Number(3.0));

    let child = root.push();
    assert!(!child.set("x", Value::Number(1.0)));
    assert_eq!(child.get("x"), Value::Number(1.0));
}

#[test]
fn test_eval_requires_eval_binding() {
    let env = new_environment();
    env.set("eval", Value::Null);
    let err = env.eval(&Value::Number(1.0)).unwrap_err();
    assert_eq!(err.kind, crate::EvalErrorKind::EvalNotBound);

    // A frame below is affected; a sibling chain is not.
    assert!(env.push().eval(&Value::Number(1.0)).is_err());
    assert_eq!(new_environment().eval(&Value::Number(1.0)).unwrap(), Value::Number(1.0));
}

#[test]
fn test_depth_guard_restores_counter() {
    let env = EnvironmentBuilder::new().max_depth(2).build();
    let library = env.library();
    {
        let _a = library.enter().unwrap();
        let _b = library.enter().unwrap();
        assert!(library.enter().is_err());
    }
    assert!(library.enter().is_ok());
}

#[test]
fn test_debug_lists_locals() {
    let env = new_environment();
    env.set("b", Value::Null);
    env.set("a", Value::Null);
    let rendered = format!("{env:?}");
    assert!(rendered.contains(r#"locals: ["a", "b"]"#), "{rendered}");
}

#[test]
fn test_library_root_is_shared_by_every_frame() {
    let root = Environment::library_root(Library::new(
        crate::stdlib::standard_library(),
        EvalConfig::default(),
    ));
    assert!(root.is_library());
    assert!(root.parent().is_none());

    let child = root.push().push();
    assert!(std::ptr::eq(root.library(), child.library()));
    assert_eq!(child.get("car"), root.get("car"));
}
