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

use crate::ast::{BinaryOp, Expr};
use crate::config::Config;
use crate::error::EvalError;
use crate::eval::eval_expr;
use crate::value::{Binding, Value};

/// Evaluates a binary operation.
///
/// `and`/`or` are handled before operand evaluation so the untaken side is
/// never touched: `false and (1/0)` must not raise. Both return the
/// deciding operand value rather than forcing a boolean.
pub(crate) fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    binding: &Binding,
    config: &Config,
) -> Result<Value, EvalError> {
    match op {
        BinaryOp::And => {
            let l = eval_expr(left, binding, config)?;
            return if !l.is_truthy() {
                Ok(l)
            } else {
                eval_expr(right, binding, config)
            };
        }

        BinaryOp::Or => {
            let l = eval_expr(left, binding, config)?;
            return if l.is_truthy() {
                Ok(l)
            } else {
                eval_expr(right, binding, config)
            };
        }

        _ => {}
    }

    let l = eval_expr(left, binding, config)?;
    let r = eval_expr(right, binding, config)?;
    apply(op, l, r)
}

fn apply(op: BinaryOp, l: Value, r: Value) -> Result<Value, EvalError> {
    match (op, l, r) {
        // -------------------------------
        // Arithmetic (numbers only)
        // -------------------------------
        (BinaryOp::Add, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (BinaryOp::Sub, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (BinaryOp::Mul, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),

        (BinaryOp::Div, Value::Number(a), Value::Number(b)) => {
            if b == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(a / b))
            }
        }

        (BinaryOp::Rem, Value::Number(a), Value::Number(b)) => {
            if b == 0.0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok(Value::Number(a % b))
            }
        }

        (BinaryOp::Pow, Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.powf(b))),

        // -------------------------------
        // String concatenation (||)
        // -------------------------------
        (BinaryOp::Concat, a, b) => match (a.coerce_to_string(), b.coerce_to_string()) {
            (Some(x), Some(y)) => Ok(Value::String(format!("{}{}", x, y))),
            _ => Err(EvalError::type_error(
                "||",
                format!("{}, {}", a.type_name(), b.type_name()),
            )),
        },

        // -------------------------------
        // Equality (any types, never an error)
        // -------------------------------
        (BinaryOp::Eq, a, b) => Ok(Value::Bool(Value::equals_loose(&a, &b))),
        (BinaryOp::Ne, a, b) => Ok(Value::Bool(!Value::equals_loose(&a, &b))),

        // -------------------------------
        // Ordering (numbers numerically, strings lexicographically)
        // -------------------------------
        (BinaryOp::Gt, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),
        (BinaryOp::Ge, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a >= b)),
        (BinaryOp::Lt, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
        (BinaryOp::Le, Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a <= b)),

        (BinaryOp::Gt, Value::String(a), Value::String(b)) => Ok(Value::Bool(a > b)),
        (BinaryOp::Ge, Value::String(a), Value::String(b)) => Ok(Value::Bool(a >= b)),
        (BinaryOp::Lt, Value::String(a), Value::String(b)) => Ok(Value::Bool(a < b)),
        (BinaryOp::Le, Value::String(a), Value::String(b)) => Ok(Value::Bool(a <= b)),

        // -------------------------------
        // Membership (in): list membership or substring
        // -------------------------------
        (BinaryOp::In, item, Value::List(items)) => Ok(Value::Bool(
            items.iter().any(|v| Value::equals_loose(&item, v)),
        )),

        (BinaryOp::In, item, Value::String(haystack)) => match item.coerce_to_string() {
            Some(needle) => Ok(Value::Bool(haystack.contains(&needle))),
            None => Err(EvalError::type_error(
                "in",
                format!("{}, String", item.type_name()),
            )),
        },

        // -------------------------------
        // Everything else is a type error
        // -------------------------------
        (op, a, b) => Err(EvalError::type_error(
            op.to_string(),
            format!("{}, {}", a.type_name(), b.type_name()),
        )),
    }
}
