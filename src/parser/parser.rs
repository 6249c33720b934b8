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

use crate::ast::Expr;
use crate::config::Config;
use crate::error::SyntaxError;
use crate::lexer::Token;

/// Parses a complete token stream into a single expression tree.
///
/// The whole input must be consumed: anything left over after one full
/// expression is a `TrailingTokens` error rather than a silent success.
/// Parsing is deterministic: the same tokens always produce a
/// structurally identical tree.
pub fn parse(tokens: Vec<Token>, config: &Config) -> Result<Expr, SyntaxError> {
    let mut parser = Parser {
        tokens,
        current: 0,
        config,
    };

    let expr = parser.expression()?;

    if !parser.is_at_end() {
        let token = parser.peek();
        return Err(SyntaxError::TrailingTokens {
            lexeme: token.lexeme.clone(),
            span: token.span,
        });
    }

    Ok(expr)
}

pub struct Parser<'a> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
    pub(crate) config: &'a Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, UnaryOp};
    use crate::lexer::tokenize;
    use crate::value::Value;

    fn parse_str(source: &str) -> Result<Expr, SyntaxError> {
        parse(tokenize(source).unwrap(), &Config::default())
    }

    fn num(n: f64) -> Expr {
        Expr::Literal(Value::Number(n))
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse_str("2+3*4").unwrap(),
            binary(BinaryOp::Add, num(2.0), binary(BinaryOp::Mul, num(3.0), num(4.0)))
        );
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(
            parse_str("(2+3)*4").unwrap(),
            binary(BinaryOp::Mul, binary(BinaryOp::Add, num(2.0), num(3.0)), num(4.0))
        );
    }

    #[test]
    fn exponentiation_is_right_associative() {
        assert_eq!(
            parse_str("2^3^2").unwrap(),
            binary(BinaryOp::Pow, num(2.0), binary(BinaryOp::Pow, num(3.0), num(2.0)))
        );
    }

    #[test]
    fn exponentiation_binds_tighter_than_unary_minus() {
        assert_eq!(
            parse_str("-2^2").unwrap(),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(binary(BinaryOp::Pow, num(2.0), num(2.0))),
            }
        );
    }

    #[test]
    fn unary_is_allowed_on_exponent() {
        assert_eq!(
            parse_str("2^-3").unwrap(),
            binary(
                BinaryOp::Pow,
                num(2.0),
                Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(num(3.0)),
                }
            )
        );
    }

    #[test]
    fn factorial_binds_tighter_than_exponentiation() {
        assert_eq!(
            parse_str("3!^2").unwrap(),
            binary(
                BinaryOp::Pow,
                Expr::Unary {
                    op: UnaryOp::Factorial,
                    operand: Box::new(num(3.0)),
                },
                num(2.0)
            )
        );
    }

    #[test]
    fn ternary_is_right_associative_and_lowest() {
        let parsed = parse_str("a ? b : c ? d : e").unwrap();
        match parsed {
            Expr::Ternary { condition, else_branch, .. } => {
                assert_eq!(*condition, var("a"));
                assert!(matches!(*else_branch, Expr::Ternary { .. }));
            }
            other => panic!("expected ternary, got {:?}", other),
        }
    }

    #[test]
    fn named_unary_function_application() {
        assert_eq!(
            parse_str("sqrt 16").unwrap(),
            Expr::Call {
                function: "sqrt".to_string(),
                arguments: vec![num(16.0)],
            }
        );

        // binds at unary level: sqrt(x) * 2, not sqrt(x * 2)
        assert_eq!(
            parse_str("sqrt x * 2").unwrap(),
            binary(
                BinaryOp::Mul,
                Expr::Call {
                    function: "sqrt".to_string(),
                    arguments: vec![var("x")],
                },
                num(2.0)
            )
        );
    }

    #[test]
    fn call_syntax_keeps_argument_lists() {
        assert_eq!(
            parse_str("min(x, 2)").unwrap(),
            Expr::Call {
                function: "min".to_string(),
                arguments: vec![var("x"), num(2.0)],
            }
        );
    }

    #[test]
    fn member_access_chains_left() {
        assert_eq!(
            parse_str("a.b.c").unwrap(),
            Expr::Member {
                object: Box::new(Expr::Member {
                    object: Box::new(var("a")),
                    property: "b".to_string(),
                }),
                property: "c".to_string(),
            }
        );
    }

    #[test]
    fn constants_fold_to_literals() {
        assert_eq!(parse_str("true").unwrap(), Expr::Literal(Value::Bool(true)));
        assert_eq!(parse_str("false").unwrap(), Expr::Literal(Value::Bool(false)));
        assert_eq!(
            parse_str("PI").unwrap(),
            Expr::Literal(Value::Number(std::f64::consts::PI))
        );
    }

    #[test]
    fn parse_is_deterministic() {
        let a = parse_str("x + y * sqrt 2 ? 'a' : 'b'").unwrap();
        let b = parse_str("x + y * sqrt 2 ? 'a' : 'b'").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn membership_is_rejected_by_default() {
        assert!(matches!(
            parse_str("x in xs"),
            Err(SyntaxError::MembershipDisabled { .. })
        ));
    }

    #[test]
    fn membership_parses_when_enabled() {
        let config = Config::default().with_membership_test(true);
        let parsed = parse(tokenize("x in xs").unwrap(), &config).unwrap();
        assert_eq!(parsed, binary(BinaryOp::In, var("x"), var("xs")));
    }

    #[test]
    fn trailing_tokens_are_an_error() {
        assert!(matches!(
            parse_str("2 3"),
            Err(SyntaxError::TrailingTokens { .. })
        ));
    }

    #[test]
    fn unmatched_grouping_is_an_error() {
        assert!(matches!(parse_str("(2+3"), Err(SyntaxError::UnexpectedEof)));
        assert!(matches!(
            parse_str("2+3)"),
            Err(SyntaxError::TrailingTokens { .. })
        ));
    }

    #[test]
    fn calling_a_non_name_is_an_error() {
        assert!(matches!(
            parse_str("(1+2)(3)"),
            Err(SyntaxError::Expected { .. })
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse_str(""), Err(SyntaxError::UnexpectedEof)));
        assert!(matches!(parse_str("2 +"), Err(SyntaxError::UnexpectedEof)));
    }
}
