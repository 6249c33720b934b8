/*
 * ============================================================================
 * XEVAL - Expression Evaluator
 * ============================================================================
 *
 * Expression Grammar
 * ------------------
 * Precedence climbing over the token stream, one method per level,
 * highest binds tightest:
 *
 *   1. grouping (...), call f(...), member access x.y
 *   2. postfix factorial !
 *   3. exponentiation ^ (right-associative)
 *   4. unary prefix -, +, not, and named unary application (sqrt 16)
 *   5. * / %           (left-associative)
 *   6. + - ||          (left-associative)
 *   7. == != >= <= > < in
 *   8. and
 *   9. or
 *  10. ternary ? :     (right-associative)
 *
 * The `in` operator is only accepted when the active configuration allows
 * the membership test; otherwise it is a hard syntax error.
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

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::parser::Parser;
use crate::value::Value;

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> Result<Expr, SyntaxError> {
        self.ternary()
    }

    fn ternary(&mut self) -> Result<Expr, SyntaxError> {
        let condition = self.or_expr()?;

        if self.match_operator("?") {
            let then_branch = self.ternary()?;
            self.consume_operator(":")?;
            let else_branch = self.ternary()?;

            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }

        Ok(condition)
    }

    fn or_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.and_expr()?;

        while self.match_operator("or") {
            let right = self.and_expr()?;
            expr = binary(BinaryOp::Or, expr, right);
        }

        Ok(expr)
    }

    fn and_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.comparison()?;

        while self.match_operator("and") {
            let right = self.comparison()?;
            expr = binary(BinaryOp::And, expr, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.additive()?;

        loop {
            let op = {
                let token = self.peek();
                if token.is_operator("==") {
                    BinaryOp::Eq
                } else if token.is_operator("!=") {
                    BinaryOp::Ne
                } else if token.is_operator(">=") {
                    BinaryOp::Ge
                } else if token.is_operator("<=") {
                    BinaryOp::Le
                } else if token.is_operator(">") {
                    BinaryOp::Gt
                } else if token.is_operator("<") {
                    BinaryOp::Lt
                } else if token.is_operator("in") {
                    if !self.config.membership_enabled() {
                        return Err(SyntaxError::MembershipDisabled { span: token.span });
                    }
                    BinaryOp::In
                } else {
                    break;
                }
            };

            self.advance();
            let right = self.additive()?;
            expr = binary(op, expr, right);
        }

        Ok(expr)
    }

    fn additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.multiplicative()?;

        loop {
            let op = if self.match_operator("+") {
                BinaryOp::Add
            } else if self.match_operator("-") {
                BinaryOp::Sub
            } else if self.match_operator("||") {
                BinaryOp::Concat
            } else {
                break;
            };

            let right = self.multiplicative()?;
            expr = binary(op, expr, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.unary()?;

        loop {
            let op = if self.match_operator("*") {
                BinaryOp::Mul
            } else if self.match_operator("/") {
                BinaryOp::Div
            } else if self.match_operator("%") {
                BinaryOp::Rem
            } else {
                break;
            };

            let right = self.unary()?;
            expr = binary(op, expr, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.match_operator("-") {
            return Ok(unary(UnaryOp::Neg, self.unary()?));
        }
        if self.match_operator("+") {
            return Ok(unary(UnaryOp::Pos, self.unary()?));
        }
        if self.match_operator("not") {
            return Ok(unary(UnaryOp::Not, self.unary()?));
        }

        // Named unary application: an identifier registered as an arity-1
        // function followed by an operand, e.g. `sqrt 16` or `round x + 1`
        // (which binds as `round(x) + 1`). Parenthesized calls are left to
        // the call path so argument lists keep precise arity errors.
        if self.is_unary_function_application() {
            let function = self.advance().lexeme;
            let operand = self.unary()?;
            return Ok(Expr::Call {
                function,
                arguments: vec![operand],
            });
        }

        self.power()
    }

    fn power(&mut self) -> Result<Expr, SyntaxError> {
        let base = self.postfix()?;

        if self.match_operator("^") {
            // Right-associative, and the exponent re-enters the unary level
            // so `2^-3` and `2^3^2` both parse.
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }

        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.call_member()?;

        while self.match_operator("!") {
            expr = unary(UnaryOp::Factorial, expr);
        }

        Ok(expr)
    }

    fn call_member(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.primary()?;

        loop {
            if self.check_punctuation('(') {
                let span = self.peek().span;
                self.advance();

                // Only plain names are callable.
                let function = match expr {
                    Expr::Variable(name) => name,
                    other => {
                        return Err(SyntaxError::Expected {
                            expected: "a function name before '('",
                            found: format!("{:?}", other),
                            span,
                        });
                    }
                };

                let mut arguments = Vec::new();
                if !self.check_punctuation(')') {
                    loop {
                        arguments.push(self.expression()?);
                        if !self.match_punctuation(',') {
                            break;
                        }
                    }
                }
                self.consume_punctuation(')', "')' to close the argument list")?;

                expr = Expr::Call {
                    function,
                    arguments,
                };
            } else if self.match_punctuation('.') {
                let property = self.consume_identifier("a property name after '.'")?;
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.advance();

        match token.kind {
            TokenKind::Number => {
                let value: f64 = token.lexeme.parse().map_err(|_| SyntaxError::UnexpectedToken {
                    lexeme: token.lexeme.clone(),
                    span: token.span,
                })?;
                Ok(Expr::Literal(Value::Number(value)))
            }

            TokenKind::String => Ok(Expr::Literal(Value::String(token.lexeme))),

            TokenKind::Identifier => {
                if token.lexeme == "true" {
                    return Ok(Expr::Literal(Value::Bool(true)));
                }
                if token.lexeme == "false" {
                    return Ok(Expr::Literal(Value::Bool(false)));
                }
                if let Some(constant) = self.config.constant(&token.lexeme) {
                    return Ok(Expr::Literal(constant.clone()));
                }
                Ok(Expr::Variable(token.lexeme))
            }

            TokenKind::Punctuation if token.lexeme == "(" => {
                let expr = self.expression()?;
                self.consume_punctuation(')', "')' to close the group")?;
                Ok(expr)
            }

            TokenKind::Eof => Err(SyntaxError::UnexpectedEof),

            _ => Err(SyntaxError::UnexpectedToken {
                lexeme: token.lexeme,
                span: token.span,
            }),
        }
    }

    fn is_unary_function_application(&self) -> bool {
        let token = self.peek();
        if token.kind != TokenKind::Identifier {
            return false;
        }
        if !self.config.functions().is_unary(&token.lexeme) {
            return false;
        }

        let next = self.peek_at(1);
        matches!(
            next.kind,
            TokenKind::Number | TokenKind::String | TokenKind::Identifier
        ) || next.is_operator("-")
            || next.is_operator("+")
            || next.is_operator("not")
    }
}
