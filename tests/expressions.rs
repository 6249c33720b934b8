/*
 * ==========================================================================
 * XEVAL - Expression Evaluator
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/xeval
 *
 * License:
 * This file is part of the XEVAL expression evaluator project.
 *
 * XEVAL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 * Full license text available at:
 *    https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::sync::Arc;

use xeval::{
    eval_str, eval_str_with_binding, parse, parse_with_config, Binding, Config, Error, EvalError,
    ParseError, SyntaxError, Value,
};

fn n(x: f64) -> Value {
    Value::Number(x)
}

fn s(x: &str) -> Value {
    Value::String(x.to_string())
}

fn bind(pairs: &[(&str, Value)]) -> Binding {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn arithmetic_follows_the_precedence_table() {
    assert_eq!(eval_str("2+3*4"), Ok(n(14.0)));
    assert_eq!(eval_str("(2+3)*4"), Ok(n(20.0)));
    assert_eq!(eval_str("2^3^2"), Ok(n(512.0)));
    assert_eq!(eval_str("10-4-3"), Ok(n(3.0)));
    assert_eq!(eval_str("-2^2"), Ok(n(-4.0)));
    assert_eq!(eval_str("2^-3"), Ok(n(0.125)));
    assert_eq!(eval_str("7 % 3"), Ok(n(1.0)));
    assert_eq!(eval_str("1.5e3 + 0.5"), Ok(n(1500.5)));
}

#[test]
fn parse_is_deterministic() {
    let a = parse("x + y * sqrt 2 ? 'a' : 'b'").unwrap();
    let b = parse("x + y * sqrt 2 ? 'a' : 'b'").unwrap();
    assert_eq!(a.to_canonical_string(), b.to_canonical_string());
    assert_eq!(a.root(), b.root());
}

#[test]
fn variables_are_reported_in_first_encountered_order() {
    assert_eq!(parse("x+y*2").unwrap().variables(), ["x", "y"]);
    assert_eq!(parse("b + a + b * a").unwrap().variables(), ["b", "a"]);
    assert!(parse("1 + 2").unwrap().variables().is_empty());
}

#[test]
fn canonical_round_trip_preserves_meaning() {
    let binding = bind(&[("x", n(10.0)), ("y", n(3.0))]);

    for source in ["x/y + 2^x", "x >= 5 ? 'big' : 'small'", "sqrt x * y!"] {
        let original = parse(source).unwrap();
        let reparsed = parse(&original.to_canonical_string()).unwrap();
        assert_eq!(original.evaluate(&binding), reparsed.evaluate(&binding));
    }
}

#[test]
fn division_by_zero_fails_fast() {
    let binding = bind(&[("x", n(5.0))]);
    assert_eq!(
        eval_str_with_binding("x/0", &binding),
        Err(Error::Eval(EvalError::DivisionByZero))
    );
    assert_eq!(
        eval_str_with_binding("x % 0", &binding),
        Err(Error::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn and_or_short_circuit() {
    assert_eq!(eval_str("false and (1/0)"), Ok(Value::Bool(false)));
    assert_eq!(eval_str("true or (1/0)"), Ok(Value::Bool(true)));

    // the taken side still evaluates normally
    assert_eq!(
        eval_str("true and (1/0)"),
        Err(Error::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn ternary_selects_exactly_one_branch() {
    let big = bind(&[("x", n(10.0))]);
    let small = bind(&[("x", n(1.0))]);

    assert_eq!(
        eval_str_with_binding("x>=5 ? 'big' : 'small'", &big),
        Ok(s("big"))
    );
    assert_eq!(
        eval_str_with_binding("x>=5 ? 'big' : 'small'", &small),
        Ok(s("small"))
    );

    // the untaken branch must not be evaluated
    assert_eq!(eval_str("1 ? 2 : 1/0"), Ok(n(2.0)));
    assert_eq!(eval_str("0 ? 1/0 : 2"), Ok(n(2.0)));
}

#[test]
fn unknown_variables_are_reported_by_name() {
    assert_eq!(
        eval_str("x + 1"),
        Err(Error::Eval(EvalError::UndefinedVariable { name: "x".into() }))
    );
}

#[test]
fn membership_test_is_opt_in() {
    assert!(matches!(
        parse("x in xs"),
        Err(ParseError::Syntax(SyntaxError::MembershipDisabled { .. }))
    ));

    let config = Arc::new(Config::default().with_membership_test(true));
    let expr = parse_with_config("x in xs", config.clone()).unwrap();

    let binding = bind(&[
        ("x", n(2.0)),
        ("xs", Value::List(vec![n(1.0), n(2.0), n(3.0)])),
    ]);
    assert_eq!(expr.evaluate(&binding), Ok(Value::Bool(true)));

    let binding = bind(&[
        ("x", n(9.0)),
        ("xs", Value::List(vec![n(1.0), n(2.0), n(3.0)])),
    ]);
    assert_eq!(expr.evaluate(&binding), Ok(Value::Bool(false)));

    let substring = parse_with_config("'ell' in word", config).unwrap();
    let binding = bind(&[("word", s("hello"))]);
    assert_eq!(substring.evaluate(&binding), Ok(Value::Bool(true)));
}

#[test]
fn factorial_is_a_postfix_operator() {
    assert_eq!(eval_str("5!"), Ok(n(120.0)));
    assert_eq!(eval_str("0!"), Ok(n(1.0)));
    assert_eq!(eval_str("3!!"), Ok(n(720.0)));
    assert_eq!(eval_str("3! + 1"), Ok(n(7.0)));

    assert!(matches!(
        eval_str("2.5!"),
        Err(Error::Eval(EvalError::Domain { .. }))
    ));
    assert!(matches!(
        eval_str("(-1)!"),
        Err(Error::Eval(EvalError::Domain { .. }))
    ));
}

#[test]
fn concatenation_coerces_numbers_only() {
    assert_eq!(eval_str("'answer: ' || 42"), Ok(s("answer: 42")));
    assert_eq!(eval_str("1 || 2"), Ok(s("12")));

    assert!(matches!(
        eval_str("'x' || true"),
        Err(Error::Eval(EvalError::Type { .. }))
    ));
}

#[test]
fn arithmetic_on_booleans_is_a_type_error() {
    assert!(matches!(
        eval_str("true + 1"),
        Err(Error::Eval(EvalError::Type { .. }))
    ));
}

#[test]
fn comparisons_work_for_numbers_and_strings() {
    assert_eq!(eval_str("1 < 2"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("'abc' < 'abd'"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("'a' == 'a'"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("1 == '1'"), Ok(Value::Bool(false)));
    assert_eq!(eval_str("1 != '1'"), Ok(Value::Bool(true)));

    assert!(matches!(
        eval_str("1 < 'a'"),
        Err(Error::Eval(EvalError::Type { .. }))
    ));
}

#[test]
fn builtin_functions_evaluate() {
    assert_eq!(eval_str("sqrt 16"), Ok(n(4.0)));
    assert_eq!(eval_str("sqrt(16)"), Ok(n(4.0)));
    assert_eq!(eval_str("sqrt 16 * 2"), Ok(n(8.0)));
    assert_eq!(eval_str("round 2.4"), Ok(n(2.0)));
    assert_eq!(eval_str("min(3, 5)"), Ok(n(3.0)));
    assert_eq!(eval_str("pow(2, 10)"), Ok(n(1024.0)));
    assert_eq!(eval_str("length('hello')"), Ok(n(5.0)));

    assert_eq!(
        eval_str("sqrt(1, 2)"),
        Err(Error::Eval(EvalError::Arity {
            name: "sqrt".into(),
            expected: 1,
            actual: 2,
        }))
    );
    assert_eq!(
        eval_str("frobnicate(1)"),
        Err(Error::Eval(EvalError::UndefinedFunction {
            name: "frobnicate".into()
        }))
    );
}

#[test]
fn constants_and_boolean_literals() {
    assert_eq!(eval_str("PI > 3.14 and PI < 3.15"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("E > 2.71 and E < 2.72"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("not false"), Ok(Value::Bool(true)));
}

#[test]
fn custom_config_extends_the_registry_before_parse() {
    let config = Arc::new(
        Config::default()
            .with_function("double", 1, |args| match &args[0] {
                Value::Number(x) => Ok(Value::Number(x * 2.0)),
                other => Err(EvalError::type_error("double", other.type_name())),
            })
            .with_constant("ANSWER", n(42.0)),
    );

    // arity-1 registration also enables prefix application
    let expr = parse_with_config("double ANSWER", config).unwrap();
    assert_eq!(expr.evaluate(&Binding::new()), Ok(n(84.0)));
}

#[test]
fn truthiness_drives_the_ternary_condition() {
    assert_eq!(eval_str("0 ? 'yes' : 'no'"), Ok(s("no")));
    assert_eq!(eval_str("42 ? 'yes' : 'no'"), Ok(s("yes")));
    assert_eq!(eval_str("'' ? 'yes' : 'no'"), Ok(s("no")));
    assert_eq!(eval_str("'x' ? 'yes' : 'no'"), Ok(s("yes")));
}

#[test]
fn object_bindings_support_member_access() {
    let mut fields = std::collections::HashMap::new();
    fields.insert("total".to_string(), n(99.5));

    let binding = bind(&[("order", Value::Object(fields))]);
    assert_eq!(
        eval_str_with_binding("order.total / 2", &binding),
        Ok(n(49.75))
    );
}

#[test]
fn lex_errors_carry_a_position() {
    match parse("2 $ 3") {
        Err(e) => {
            assert_eq!(e.code(), "E_LEX");
            let span = e.span().expect("lex errors carry a span");
            assert_eq!(span.line, 1);
            assert_eq!(span.column, 2);
        }
        Ok(_) => panic!("expected a lex error"),
    }
}
