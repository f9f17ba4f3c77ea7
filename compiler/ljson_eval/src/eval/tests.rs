#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{eval_err, eval_ok, form, run_in};
use crate::{new_environment, EnvironmentBuilder, ErrorCategory, EvalErrorKind};
use pretty_assertions::assert_eq;
use serde_json::json;

// -- Self-evaluation --

#[test]
fn test_atoms_evaluate_to_themselves() {
    let env = new_environment();
    for atom in [
        Value::Null,
        Value::Bool(true),
        Value::Number(-2.5),
        Value::string("car"),
    ] {
        assert_eq!(evaluate(&env, &atom).unwrap(), atom);
    }
}

#[test]
fn test_strings_read_local_bindings() {
    let env = new_environment();
    assert_eq!(run_in(&env, json!("x")).unwrap(), Value::string("x"));

    env.set("x", Value::Number(1.0));
    assert_eq!(run_in(&env, json!("x")).unwrap(), Value::Number(1.0));
    assert_eq!(run_in(&env.push(), json!("x")).unwrap(), Value::Number(1.0));

    // Builtin names stay plain strings.
    assert_eq!(run_in(&env, json!("car")).unwrap(), Value::string("car"));
    assert_eq!(
        run_in(&env, json!(["isFunction", "car"])).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_callables_evaluate_to_themselves() {
    let env = new_environment();
    let plus = env.get("+");
    assert_eq!(evaluate(&env, &plus).unwrap(), plus);
}

// -- Call forms --

#[test]
fn test_quote_does_not_evaluate() {
    assert_eq!(
        eval_ok(json!(["quote", ["throw", "boom"]])),
        form(json!(["throw", "boom"]))
    );
}

#[test]
fn test_if_evaluates_one_branch() {
    assert_eq!(
        eval_ok(json!(["if", true, "yes", ["throw", "boom"]])),
        Value::string("yes")
    );
    assert_eq!(
        eval_ok(json!(["if", false, ["throw", "boom"], "no"])),
        Value::string("no")
    );
}

#[test]
fn test_let_bindings_are_sequential() {
    assert_eq!(
        eval_ok(json!(["let", "x", 1, "y", ["+", "x", 1], "y"])),
        Value::Number(2.0)
    );
}

#[test]
fn test_arithmetic_folds_left() {
    assert_eq!(eval_ok(json!(["-", 10, 3, 2])), Value::Number(5.0));
    assert_eq!(eval_ok(json!(["/", 100, 2, 5])), Value::Number(10.0));
    assert_eq!(eval_ok(json!(["+"])), Value::Number(0.0));
}

#[test]
fn test_closure_call() {
    assert_eq!(
        eval_ok(json!([["fn", ["a", "b"], ["+", "a", "b"]], 2, 3])),
        Value::Number(5.0)
    );

    let err = eval_err(json!([["fn", ["a", "b"], ["+", "a", "b"]], 2]));
    assert_eq!(err.category(), ErrorCategory::Arity);
    assert_eq!(err.message, "fn expects 2 arguments, got 1");
}

#[test]
fn test_variadic_closure_binds_rest() {
    assert_eq!(
        eval_ok(json!([["fn", ["a", "&rest"], ["get", "rest"]], 1, 2, 3])),
        form(json!([2, 3]))
    );
    assert_eq!(
        eval_ok(json!([["fn", ["a", "&rest"], ["get", "rest"]], 1])),
        form(json!([]))
    );
}

#[test]
fn test_closure_keeps_defining_environment() {
    let definer = new_environment();
    let f = run_in(&definer, json!(["let", "x", 5, ["fn", [], "x"]])).unwrap();

    let elsewhere = new_environment();
    elsewhere.set("x", Value::Number(99.0));
    elsewhere.set("f", f);
    assert_eq!(run_in(&elsewhere, json!(["f"])).unwrap(), Value::Number(5.0));
}

#[test]
fn test_closure_arguments_evaluate_in_caller() {
    let env = new_environment();
    env.set("y", Value::Number(7.0));
    // `id` captures a frame where `y` is 1, but its argument is read where
    // the call happens.
    let result = run_in(
        &env,
        json!(["let", "id", ["let", "y", 1, ["fn", ["v"], "v"]], ["id", "y"]]),
    );
    assert_eq!(result.unwrap(), Value::Number(7.0));
}

#[test]
fn test_eq_is_structural() {
    assert_eq!(
        eval_ok(json!(["eq", ["quote", [1, 2, 3]], ["quote", [1, 2, 3]]])),
        Value::Bool(true)
    );
    assert_eq!(
        eval_ok(json!(["eq", ["quote", [1, [2]]], ["quote", [1, [3]]]])),
        Value::Bool(false)
    );
}

#[test]
fn test_try_converts_errors() {
    assert_eq!(
        eval_ok(json!(["try", ["throw", "boom"]])),
        form(json!(["error", "boom"]))
    );

    let err = eval_err(json!(["throw", "boom"]));
    assert!(err.message.contains("boom"));
    assert_eq!(err.category(), ErrorCategory::User);
}

#[test]
fn test_first_error_aborts() {
    let err = eval_err(json!(["evalAll", ["throw", "first"], ["throw", "second"]]));
    assert_eq!(err.message, "first");
}

#[test]
fn test_assert_eq_reports_raw_forms() {
    let err = eval_err(json!(["assertEq", 1, 2]));
    assert_eq!(err.message, "assert failed: 1 != 2");

    let err = eval_err(json!(["assertEq", ["+", 1, 1], 3]));
    assert_eq!(err.message, r#"assert failed: ["+",1,1] != 3"#);
}

// -- Head resolution --

#[test]
fn test_multi_level_indirection() {
    let env = new_environment();
    env.set("a", Value::string("b"));
    env.set("b", env.get("+"));
    assert_eq!(run_in(&env, json!(["a", 1, 2])).unwrap(), Value::Number(3.0));
}

#[test]
fn test_head_can_be_any_form() {
    assert_eq!(
        eval_ok(json!([["if", true, "+", "-"], 5, 2])),
        Value::Number(7.0)
    );
}

#[test]
fn test_unknown_function() {
    let err = eval_err(json!(["nope", 1]));
    assert_eq!(
        err.kind,
        EvalErrorKind::FunctionNotFound {
            name: "nope".to_string()
        }
    );
    assert_eq!(err.message, "function `nope` not found");
}

#[test]
fn test_non_callable_head() {
    let err = eval_err(json!([1, 2]));
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "number" });

    let env = new_environment();
    env.set("x", Value::Number(5.0));
    let err = run_in(&env, json!(["x"])).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "number" });
    assert_eq!(err.category(), ErrorCategory::Type);
}

#[test]
fn test_empty_list_is_an_error() {
    let err = eval_err(json!([]));
    assert_eq!(err.kind, EvalErrorKind::EmptyCallForm);
    assert_eq!(err.message, "cannot evaluate empty list");
}

#[test]
fn test_aliasing_cycle_hits_indirection_limit() {
    let env = new_environment();
    env.set("a", Value::string("b"));
    env.set("b", Value::string("a"));
    let err = run_in(&env, json!(["a"])).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IndirectionLimit {
            name: "a".to_string(),
            limit: 64
        }
    );
    assert_eq!(err.category(), ErrorCategory::Limit);
}

#[test]
fn test_indirection_limit_is_configurable() {
    let tight = EnvironmentBuilder::new().max_indirection(1).build();
    tight.set("a", Value::string("+"));
    let err = run_in(&tight, json!(["a", 1])).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);

    let loose = EnvironmentBuilder::new().max_indirection(2).build();
    loose.set("a", Value::string("+"));
    assert_eq!(run_in(&loose, json!(["a", 1])).unwrap(), Value::Number(1.0));
}

// -- Depth limit --

#[test]
fn test_runaway_recursion_hits_depth_limit() {
    let env = EnvironmentBuilder::new().max_depth(50).build();
    let err = run_in(&env, json!(["let", "f", ["fn", [], ["f"]], ["f"]])).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 50 });

    // The counter unwinds with the error.
    assert_eq!(run_in(&env, json!(["+", 1, 2])).unwrap(), Value::Number(3.0));
}

#[test]
fn test_try_catches_depth_limit() {
    let env = EnvironmentBuilder::new().max_depth(50).build();
    let result = run_in(&env, json!(["try", ["let", "f", ["fn", [], ["f"]], ["f"]]])).unwrap();
    assert_eq!(
        result,
        form(json!(["error", "maximum evaluation depth exceeded (limit: 50)"]))
    );
}

#[test]
fn test_deep_recursion_within_default_limit() {
    let program = json!([
        "let",
        "down",
        ["fn", ["n"], ["if", ["eq", "n", 0], 0, ["+", 1, ["down", ["-", "n", 1]]]]],
        ["down", 1000]
    ]);
    assert_eq!(eval_ok(program), Value::Number(1000.0));
}

// -- Property tests --

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_eval {
    use super::super::evaluate;
    use crate::test_helpers::form;
    use crate::{new_environment, Value};
    use proptest::prelude::*;
    use serde_json::json;

    fn atom() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-1.0e12..1.0e12f64).prop_map(Value::Number),
            "[a-zA-Z+*/<>=-]{0,12}".prop_map(Value::string),
        ]
    }

    proptest! {
        #[test]
        fn atoms_self_evaluate(value in atom()) {
            let env = new_environment();
            prop_assert_eq!(evaluate(&env, &value).unwrap(), value);
        }

        #[test]
        fn quote_returns_its_argument(value in atom()) {
            let env = new_environment();
            let quoted = Value::quoted(Value::list(vec![value.clone(), Value::string("x")]));
            prop_assert_eq!(
                env.eval(&quoted).unwrap(),
                Value::list(vec![value, Value::string("x")])
            );
        }

        #[test]
        fn addition_matches_host(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            let env = new_environment();
            let sum = env.eval(&form(json!(["+", a, b]))).unwrap();
            #[allow(clippy::cast_precision_loss, reason = "operands are small")]
            let expected = (a + b) as f64;
            prop_assert_eq!(sum, Value::Number(expected));
        }

        #[test]
        fn single_operand_is_identity(n in -1.0e9..1.0e9f64) {
            let env = new_environment();
            for op in ["+", "-", "*", "/"] {
                let result = env
                    .eval(&Value::list(vec![Value::string(op), Value::Number(n)]))
                    .unwrap();
                prop_assert_eq!(result, Value::Number(n));
            }
        }
    }
}
