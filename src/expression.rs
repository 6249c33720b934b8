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

use crate::ast::{Expr, UnaryOp};
use crate::config::Config;
use crate::error::EvalError;
use crate::eval::eval_expr;
use crate::value::{Binding, Value};

/// A parsed, immutable expression.
///
/// Built once, evaluated many times: the tree never changes after parsing,
/// so a single `Expression` can be shared across threads and evaluated
/// concurrently against independent bindings; the line-by-line stdin mode
/// and the HTTP server both rely on this.
///
/// The free-variable list is computed by one traversal at construction and
/// cached for the lifetime of the expression.
#[derive(Debug, Clone)]
pub struct Expression {
    root: Expr,
    variables: Vec<String>,
    config: Arc<Config>,
}

impl Expression {
    pub(crate) fn new(root: Expr, config: Arc<Config>) -> Self {
        let mut variables = Vec::new();
        collect_variables(&root, &mut variables);

        Self {
            root,
            variables,
            config,
        }
    }

    /// Every distinct variable name in the tree, in first-encountered order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The root node, for callers that want to inspect the tree shape.
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluates the tree against `binding`. The binding is only read; a
    /// failed evaluation leaves the expression fully reusable.
    pub fn evaluate(&self, binding: &Binding) -> Result<Value, EvalError> {
        eval_expr(&self.root, binding, &self.config)
    }

    /// Re-renders the tree with explicit parenthesization reflecting the
    /// precedence it was parsed with. Parsing the canonical form again
    /// yields a tree that evaluates identically; the CLI and HTTP debug
    /// modes log this form.
    pub fn to_canonical_string(&self) -> String {
        render(&self.root)
    }
}

fn collect_variables(expr: &Expr, out: &mut Vec<String>) {
    match expr {
        Expr::Literal(_) => {}

        Expr::Variable(name) => {
            if !out.iter().any(|v| v == name) {
                out.push(name.clone());
            }
        }

        Expr::Unary { operand, .. } => collect_variables(operand, out),

        Expr::Binary { left, right, .. } => {
            collect_variables(left, out);
            collect_variables(right, out);
        }

        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            collect_variables(condition, out);
            collect_variables(then_branch, out);
            collect_variables(else_branch, out);
        }

        Expr::Call { arguments, .. } => {
            for argument in arguments {
                collect_variables(argument, out);
            }
        }

        // A property name is not a variable; only the base can hold one.
        Expr::Member { object, .. } => collect_variables(object, out),
    }
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Literal(value) => render_literal(value),

        Expr::Variable(name) => name.clone(),

        Expr::Unary { op, operand } => match op {
            UnaryOp::Factorial => format!("({}!)", render(operand)),
            UnaryOp::Not => format!("(not {})", render(operand)),
            UnaryOp::Neg => format!("(-{})", render(operand)),
            UnaryOp::Pos => format!("(+{})", render(operand)),
        },

        Expr::Binary { op, left, right } => {
            format!("({} {} {})", render(left), op, render(right))
        }

        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => format!(
            "({} ? {} : {})",
            render(condition),
            render(then_branch),
            render(else_branch)
        ),

        Expr::Call {
            function,
            arguments,
        } => {
            let args = arguments.iter().map(render).collect::<Vec<_>>().join(", ");
            format!("{}({})", function, args)
        }

        Expr::Member { object, property } => format!("{}.{}", render(object), property),
    }
}

fn render_literal(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),

        Value::String(s) => {
            let mut out = String::with_capacity(s.len() + 2);
            out.push('\'');
            for ch in s.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    '\r' => out.push_str("\\r"),
                    other => out.push(other),
                }
            }
            out.push('\'');
            out
        }

        // Lists and objects only exist inside bindings, never in parsed
        // trees, so this arm is for completeness.
        other => other.stringify(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, parse_with_config};

    #[test]
    fn variables_in_first_encountered_order() {
        let expr = parse("x + y * 2").unwrap();
        assert_eq!(expr.variables(), ["x", "y"]);

        let expr = parse("b + a + b").unwrap();
        assert_eq!(expr.variables(), ["b", "a"]);
    }

    #[test]
    fn function_names_and_properties_are_not_variables() {
        let expr = parse("sqrt(x) + order.total").unwrap();
        assert_eq!(expr.variables(), ["x", "order"]);
    }

    #[test]
    fn canonical_string_makes_precedence_explicit() {
        assert_eq!(
            parse("2+3*4").unwrap().to_canonical_string(),
            "(2 + (3 * 4))"
        );
        assert_eq!(
            parse("2^3^2").unwrap().to_canonical_string(),
            "(2 ^ (3 ^ 2))"
        );
        assert_eq!(
            parse("x>=5 ? 'big' : 'small'").unwrap().to_canonical_string(),
            "((x >= 5) ? 'big' : 'small')"
        );
        assert_eq!(parse("sqrt 16").unwrap().to_canonical_string(), "sqrt(16)");
        assert_eq!(parse("-x!").unwrap().to_canonical_string(), "(-(x!))");
    }

    #[test]
    fn canonical_string_escapes_strings() {
        let expr = parse(r"'it\'s' || 'a\nb'").unwrap();
        assert_eq!(expr.to_canonical_string(), r"('it\'s' || 'a\nb')");
    }

    #[test]
    fn canonical_round_trip_evaluates_identically() {
        let config = std::sync::Arc::new(crate::Config::default());

        for source in [
            "2+3*4",
            "2^3^2",
            "(2+3)*4",
            "-2^2",
            "x>=5 ? 'big' : 'small'",
            "not x and y or z",
            "sqrt 16 + min(1, 2)",
            "'a' || 'b' || 3",
            "5!",
        ] {
            let original = parse_with_config(source, config.clone()).unwrap();
            let reparsed =
                parse_with_config(&original.to_canonical_string(), config.clone()).unwrap();

            let mut binding = Binding::new();
            binding.insert("x".to_string(), Value::Number(10.0));
            binding.insert("y".to_string(), Value::Bool(false));
            binding.insert("z".to_string(), Value::Bool(true));

            assert_eq!(
                original.evaluate(&binding),
                reparsed.evaluate(&binding),
                "round trip changed meaning for {:?}",
                source
            );
        }
    }
}
