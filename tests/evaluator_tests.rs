use serde_json::json;
use stencil_lang::{
    EvalError, ExprError, Value, evaluate,
    evaluator::Evaluator,
    lexer::Lexer,
    parser::{ParseError, Parser},
};

fn eval_expr(expr_str: &str, doc: &Value) -> Result<Value, EvalError> {
    let lexer = Lexer::new(expr_str);
    let mut parser = Parser::new(lexer).unwrap();
    let expr = parser.parse().unwrap();

    Evaluator::new().evaluate(&expr, doc)
}

fn eval_number(expr_str: &str, doc: &Value) -> f64 {
    match eval_expr(expr_str, doc) {
        Ok(Value::Number(n)) => n,
        other => panic!("Expected number for {}, got {:?}", expr_str, other),
    }
}

fn context() -> Value {
    Value::from(json!({
        "name": "Alice",
        "age": 30,
        "address": { "city": "Seoul", "zip": null },
        "friends": [{ "age": 28 }, { "age": 35 }],
        "arr": [1, 2],
        "matrix": [[1, 2], [3, 4]],
        "i": 1,
        "half": 0.5,
        "label": "7",
        "blank": "  "
    }))
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_literal_arithmetic() {
    let ctx = context();
    let test_cases = vec![
        ("1+2", 3.0),
        ("2+3*4", 14.0),
        ("(2+3)*4", 20.0),
        ("10 - 4 - 3", 3.0),
        ("7 / 2", 3.5),
        ("7 % 4", 3.0),
        ("2 ^ 10", 1024.0),
        ("-3+2", -1.0),
        ("--3", 3.0),
        ("+4", 4.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_number(input, &ctx), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_power_is_left_associative() {
    let ctx = context();
    // (2^3)^2 = 64 and (2^1)^2 = 4; right-associative would give 512 and 2
    assert_eq!(eval_number("2^3^2", &ctx), 64.0);
    assert_eq!(eval_number("2^1^2", &ctx), 4.0);
}

#[test]
fn test_unary_binds_before_power() {
    assert_eq!(eval_number("-2^2", &context()), 4.0);
}

#[test]
fn test_modulo_sign_follows_dividend() {
    let ctx = context();
    assert_eq!(eval_number("-7 % 3", &ctx), -1.0);
    assert_eq!(eval_number("7 % -3", &ctx), 1.0);
    assert_eq!(eval_number("5.5 % 2", &ctx), 1.5);
}

#[test]
fn test_ieee_edge_cases_are_not_errors() {
    let ctx = context();
    assert_eq!(eval_number("1 / 0", &ctx), f64::INFINITY);
    assert_eq!(eval_number("-1 / 0", &ctx), f64::NEG_INFINITY);
    assert!(eval_number("0 / 0", &ctx).is_nan());
    assert!(eval_number("5 % 0", &ctx).is_nan());
    assert!(eval_number("(-8) ^ half", &ctx).is_nan());
    assert_eq!(eval_number("4 ^ half", &ctx), 2.0);
    assert_eq!(eval_number("2 ^ -1", &ctx), 0.5);
}

#[test]
fn test_string_concatenation() {
    let ctx = context();
    assert_eq!(
        eval_expr("name + 1", &ctx).unwrap(),
        Value::String("Alice1".into())
    );
    assert_eq!(
        eval_expr("address.city + age", &ctx).unwrap(),
        Value::String("Seoul30".into())
    );
}

#[test]
fn test_non_numeric_operands() {
    let ctx = context();
    for input in ["name * 2", "name - 1", "-name", "address + 1", "arr * 2"] {
        assert!(
            matches!(eval_expr(input, &ctx), Err(EvalError::TypeError(_))),
            "Expected type error for input: {}",
            input
        );
    }
}

#[test]
fn test_unary_plus_coerces_numeric_strings() {
    let ctx = context();
    assert_eq!(eval_number("+label + 1", &ctx), 8.0);
    assert!(matches!(
        eval_expr("+name", &ctx),
        Err(EvalError::TypeError(_))
    ));
}

#[test]
fn test_unary_plus_on_blank_string_is_zero() {
    let ctx = context();
    assert_eq!(eval_number("+blank", &ctx), 0.0);
    assert_eq!(eval_number("+blank + 5", &ctx), 5.0);
    let empty = Value::from(json!({ "s": "" }));
    assert_eq!(eval_number("+s", &empty), 0.0);
}

// ============================================================================
// Variables and Access
// ============================================================================

#[test]
fn test_variable_lookup() {
    assert_eq!(eval_number("age+5", &context()), 35.0);
}

#[test]
fn test_undefined_variable() {
    let err = eval_expr("missing", &Value::from(json!({}))).unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("missing".to_string()));
    assert_eq!(err.to_string(), "Undefined variable: missing");
}

#[test]
fn test_variable_lookup_on_non_object_context() {
    let err = eval_expr("x", &Value::Array(vec![])).unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("x".to_string()));
}

#[test]
fn test_null_is_a_present_value() {
    assert_eq!(eval_expr("address.zip", &context()).unwrap(), Value::Null);
}

#[test]
fn test_property_chain() {
    assert_eq!(
        eval_expr("address.city", &context()).unwrap(),
        Value::String("Seoul".into())
    );
}

#[test]
fn test_index_then_property() {
    let ctx = context();
    assert_eq!(eval_number("friends[0].age", &ctx), 28.0);
    assert_eq!(eval_number("friends[i].age", &ctx), 35.0);
    assert_eq!(eval_number("matrix[1][0]", &ctx), 3.0);
    assert_eq!(eval_number("arr[2 - 1]", &ctx), 2.0);
}

#[test]
fn test_out_of_bounds_index() {
    let ctx = context();
    assert_eq!(
        eval_expr("arr[5]", &ctx).unwrap_err(),
        EvalError::IndexOutOfBounds { index: 5.0, len: 2 }
    );
    assert_eq!(
        eval_expr("arr[-1]", &ctx).unwrap_err(),
        EvalError::IndexOutOfBounds { index: -1.0, len: 2 }
    );
}

#[test]
fn test_non_integer_index() {
    let ctx = context();
    assert!(matches!(
        eval_expr("arr[0.5]", &ctx),
        Err(EvalError::InvalidIndex(_))
    ));
    assert!(matches!(
        eval_expr("arr[name]", &ctx),
        Err(EvalError::InvalidIndex(_))
    ));
}

#[test]
fn test_indexing_non_array() {
    let ctx = context();
    assert_eq!(
        eval_expr("address[0]", &ctx).unwrap_err(),
        EvalError::NotIndexable { type_name: "object" }
    );
    assert_eq!(
        eval_expr("name[0]", &ctx).unwrap_err(),
        EvalError::NotIndexable { type_name: "string" }
    );
}

#[test]
fn test_missing_property() {
    let err = eval_expr("address.country", &context()).unwrap_err();
    match err {
        EvalError::MissingProperty { property, object } => {
            assert_eq!(property, "country");
            assert_eq!(object, "object {city, zip}");
        }
        other => panic!("Expected missing property, got {:?}", other),
    }
}

#[test]
fn test_property_on_scalar() {
    let err = eval_expr("age.years", &context()).unwrap_err();
    assert_eq!(
        err,
        EvalError::MissingProperty {
            property: "years".to_string(),
            object: "30".to_string(),
        }
    );
}

#[test]
fn test_missing_property_on_large_object_is_summarized() {
    let fields: serde_json::Map<String, serde_json::Value> = (0..10_000)
        .map(|i| (format!("field{:05}", i), json!("x".repeat(100))))
        .collect();
    let ctx = Value::from(json!({ "big": fields }));

    let err = eval_expr("big.nope", &ctx).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Property 'nope' not found on object {field00000, "));
    assert!(message.ends_with(", ...}"));
    assert!(message.len() < 200);
}

#[test]
fn test_deep_chain_resolves_inside_context() {
    let ctx = Value::from(json!({
        "a": { "b": [{ "c": { "d": [10, 20, { "e": "deep" }] } }] }
    }));
    assert_eq!(
        eval_expr("a.b[0].c.d[2].e", &ctx).unwrap(),
        Value::String("deep".into())
    );
    assert_eq!(eval_number("a.b[0].c.d[1] + a.b.length", &ctx), 21.0);
    assert_eq!(
        eval_expr("a.b[0].c", &ctx).unwrap(),
        Value::from(json!({ "d": [10, 20, { "e": "deep" }] }))
    );
}

#[test]
fn test_length_property() {
    let ctx = context();
    assert_eq!(eval_number("friends.length", &ctx), 2.0);
    assert_eq!(eval_number("name.length", &ctx), 5.0);
    assert_eq!(eval_number("arr[arr.length - 1]", &ctx), 2.0);
}

// ============================================================================
// Built-in Functions
// ============================================================================

#[test]
fn test_builtins() {
    let ctx = context();
    let test_cases = vec![
        ("max(1,5,3)", 5.0),
        ("min(4, 2, 8)", 2.0),
        ("max(age)", 30.0),
        ("round(abs(-3.7))", 4.0),
        ("round(2.5)", 3.0),
        ("round(-2.5)", -2.0),
        ("floor(-1.5)", -2.0),
        ("ceil(1.2)", 2.0),
        ("abs(-age)", 30.0),
        ("max(age, friends[0].age, friends[1].age)", 35.0),
        ("round(abs(age) ^ 0.5)", 5.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_number(input, &ctx), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_builtin_names_ignore_case() {
    let ctx = context();
    assert_eq!(eval_number("MAX(1, 2)", &ctx), 2.0);
    assert_eq!(eval_number("Floor(2.7)", &ctx), 2.0);
}

#[test]
fn test_extra_arguments_ignored_for_unary_builtins() {
    let ctx = context();
    assert_eq!(eval_number("abs(-1, 99)", &ctx), 1.0);
    assert_eq!(eval_number("ceil(0.1, -5, 7)", &ctx), 1.0);
}

#[test]
fn test_builtins_require_an_argument() {
    let ctx = context();
    for name in ["min", "max", "abs", "round", "floor", "ceil"] {
        let input = format!("{}()", name);
        assert!(
            matches!(eval_expr(&input, &ctx), Err(EvalError::Arity { expected: 1, .. })),
            "Expected arity error for {}",
            input
        );
    }
}

#[test]
fn test_min_max_propagate_nan() {
    let ctx = context();
    assert!(eval_number("max(1, 0/0, 3)", &ctx).is_nan());
    assert!(eval_number("min(0/0, 1)", &ctx).is_nan());
}

#[test]
fn test_unknown_function() {
    let err = eval_expr("sqrt(4)", &context()).unwrap_err();
    assert_eq!(err, EvalError::UnknownFunction("sqrt".to_string()));
}

#[test]
fn test_argument_errors_come_first() {
    // Arguments are evaluated before the name is resolved
    let err = eval_expr("sqrt(missing)", &context()).unwrap_err();
    assert_eq!(err, EvalError::UndefinedVariable("missing".to_string()));
}

#[test]
fn test_builtin_rejects_non_numbers() {
    assert!(matches!(
        eval_expr("abs(name)", &context()),
        Err(EvalError::TypeError(_))
    ));
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_evaluate_pipeline() {
    let ctx = context();
    assert_eq!(evaluate("age * 2", &ctx).unwrap(), Value::Number(60.0));
    assert!(matches!(
        evaluate("age +", &ctx),
        Err(ExprError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert!(matches!(
        evaluate("age ; 1", &ctx),
        Err(ExprError::Parse(ParseError::Lex(_)))
    ));
    assert!(matches!(
        evaluate("nobody", &ctx),
        Err(ExprError::Eval(EvalError::UndefinedVariable(_)))
    ));
}

#[test]
fn test_context_is_not_modified() {
    let ctx = context();
    let before = ctx.clone();
    let _ = evaluate("friends[1].age + address.city.length", &ctx);
    let _ = evaluate("friends[9]", &ctx);
    assert_eq!(ctx, before);
}

#[test]
fn test_concurrent_evaluation_shares_context() {
    let ctx = std::sync::Arc::new(context());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let ctx = ctx.clone();
            std::thread::spawn(move || evaluate(&format!("age + {}", n), &ctx))
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let value = handle.join().unwrap().unwrap();
        assert_eq!(value, Value::Number(30.0 + n as f64));
    }
}
