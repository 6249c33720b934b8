/*
 * ============================================================================
 * XEVAL - Expression Evaluator
 * ============================================================================
 *
 * Expression Evaluation Engine
 * -----------------------------
 * This module walks a parsed expression tree against a variable binding and
 * produces a runtime `Value`.
 *
 * This includes:
 *   - Literals and variable lookup
 *   - Unary operators (prefix -, +, not; postfix factorial)
 *   - Binary operators (arithmetic, concatenation, comparison, membership)
 *   - Short-circuiting and / or
 *   - Ternary selection
 *   - Builtin function calls with arity checking
 *   - Member access into object-valued bindings
 *
 * Evaluation is **pure**: the tree and the binding are never mutated, no
 * I/O happens, and nothing is logged; errors are returned to the caller.
 * A failed evaluation does not affect other evaluations of the same tree,
 * including concurrent ones.
 *
 * ---------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * Github:   https://github.com/samwilcox/xeval
 *
 * License:
 * This file is part of the XEVAL expression evaluator project.
 *
 * XEVAL is dual-licensed under the terms of:
 *   - The MIT License
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
 * ============================================================================
 */

pub mod binary;
pub mod functions;

use crate::ast::{Expr, UnaryOp};
use crate::config::Config;
use crate::error::EvalError;
use crate::eval::functions::factorial;
use crate::value::{Binding, Value};

/// Evaluates a single expression node and returns its runtime value.
///
/// This is the core dispatcher: every node in the tree eventually passes
/// through this function.
pub fn eval_expr(expr: &Expr, binding: &Binding, config: &Config) -> Result<Value, EvalError> {
    match expr {
        // ---------------------------------------------------------------------
        // Literal Values
        // ---------------------------------------------------------------------
        Expr::Literal(v) => Ok(v.clone()),

        // ---------------------------------------------------------------------
        // Variable Lookup
        // ---------------------------------------------------------------------
        Expr::Variable(name) => binding
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable { name: name.clone() }),

        // ---------------------------------------------------------------------
        // Unary Operators
        // ---------------------------------------------------------------------
        Expr::Unary { op, operand } => {
            let v = eval_expr(operand, binding, config)?;

            match op {
                UnaryOp::Neg => match v {
                    Value::Number(n) => Ok(Value::Number(-n)),
                    other => Err(EvalError::type_error("-", other.type_name())),
                },

                UnaryOp::Pos => match v {
                    Value::Number(n) => Ok(Value::Number(n)),
                    other => Err(EvalError::type_error("+", other.type_name())),
                },

                UnaryOp::Not => Ok(Value::Bool(!v.is_truthy())),

                UnaryOp::Factorial => match v {
                    Value::Number(n) => Ok(Value::Number(factorial(n)?)),
                    other => Err(EvalError::type_error("!", other.type_name())),
                },
            }
        }

        // ---------------------------------------------------------------------
        // Binary Operators (including short-circuiting and/or)
        // ---------------------------------------------------------------------
        Expr::Binary { op, left, right } => binary::eval_binary(*op, left, right, binding, config),

        // ---------------------------------------------------------------------
        // Ternary Selection (exactly one branch is evaluated)
        // ---------------------------------------------------------------------
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval_expr(condition, binding, config)?.is_truthy() {
                eval_expr(then_branch, binding, config)
            } else {
                eval_expr(else_branch, binding, config)
            }
        }

        // ---------------------------------------------------------------------
        // Function Calls
        // ---------------------------------------------------------------------
        Expr::Call {
            function,
            arguments,
        } => {
            let entry = config.functions().get(function).ok_or_else(|| {
                EvalError::UndefinedFunction {
                    name: function.clone(),
                }
            })?;

            if entry.arity != arguments.len() {
                return Err(EvalError::Arity {
                    name: function.clone(),
                    expected: entry.arity,
                    actual: arguments.len(),
                });
            }

            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(eval_expr(argument, binding, config)?);
            }

            (entry.body)(&args)
        }

        // ---------------------------------------------------------------------
        // Member Access into object-valued bindings
        // ---------------------------------------------------------------------
        Expr::Member { object, property } => {
            let base = eval_expr(object, binding, config)?;

            match base {
                Value::Object(fields) => fields.get(property).cloned().ok_or_else(|| {
                    EvalError::type_error(".", format!("Object without property '{}'", property))
                }),
                other => Err(EvalError::type_error(
                    ".",
                    format!("{} (member access needs an Object)", other.type_name()),
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;
    use std::collections::HashMap;

    fn eval(source: &str, binding: &Binding) -> Result<Value, EvalError> {
        let config = Config::default();
        let expr = parse(tokenize(source).unwrap(), &config).unwrap();
        eval_expr(&expr, binding, &config)
    }

    #[test]
    fn unary_operators() {
        let empty = Binding::new();
        assert_eq!(eval("-4", &empty), Ok(Value::Number(-4.0)));
        assert_eq!(eval("+4", &empty), Ok(Value::Number(4.0)));
        assert_eq!(eval("not 0", &empty), Ok(Value::Bool(true)));
        assert_eq!(eval("not 'x'", &empty), Ok(Value::Bool(false)));
        assert_eq!(eval("5!", &empty), Ok(Value::Number(120.0)));
        assert!(matches!(eval("-'a'", &empty), Err(EvalError::Type { .. })));
    }

    #[test]
    fn factorial_domain_errors_surface() {
        let empty = Binding::new();
        assert!(matches!(eval("(-1)!", &empty), Err(EvalError::Domain { .. })));
        assert!(matches!(eval("2.5!", &empty), Err(EvalError::Domain { .. })));
    }

    #[test]
    fn call_arity_is_checked() {
        let empty = Binding::new();
        assert_eq!(
            eval("min(1)", &empty),
            Err(EvalError::Arity {
                name: "min".into(),
                expected: 2,
                actual: 1,
            })
        );
        assert_eq!(
            eval("nope(1)", &empty),
            Err(EvalError::UndefinedFunction { name: "nope".into() })
        );
    }

    #[test]
    fn member_access_reads_object_bindings() {
        let mut fields = HashMap::new();
        fields.insert("rate".to_string(), Value::Number(0.2));

        let mut binding = Binding::new();
        binding.insert("order".to_string(), Value::Object(fields));

        assert_eq!(eval("order.rate * 100", &binding), Ok(Value::Number(20.0)));
        assert!(matches!(
            eval("order.missing", &binding),
            Err(EvalError::Type { .. })
        ));
        assert!(matches!(eval("(1).x", &binding), Err(EvalError::Type { .. })));
    }

    #[test]
    fn failed_evaluation_leaves_tree_reusable() {
        let config = Config::default();
        let expr = parse(tokenize("x / y").unwrap(), &config).unwrap();

        let mut bad = Binding::new();
        bad.insert("x".to_string(), Value::Number(1.0));
        bad.insert("y".to_string(), Value::Number(0.0));
        assert_eq!(
            eval_expr(&expr, &bad, &config),
            Err(EvalError::DivisionByZero)
        );

        let mut good = Binding::new();
        good.insert("x".to_string(), Value::Number(6.0));
        good.insert("y".to_string(), Value::Number(3.0));
        assert_eq!(eval_expr(&expr, &good, &config), Ok(Value::Number(2.0)));
    }
}
