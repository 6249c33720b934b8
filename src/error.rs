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

use crate::span::Span;

/// Errors reported while turning raw characters into tokens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    /// A character that no token can start with.
    #[error("unrecognized character '{ch}' at {span}")]
    UnrecognizedChar { ch: char, span: Span },

    /// A string literal whose closing quote never arrived.
    #[error("unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },
}

/// Errors reported while shaping tokens into an expression tree.
///
/// Every variant that can point at a token carries its span so the
/// diagnostic printer can underline the offending position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    /// A token that is not allowed at the given location.
    #[error("unexpected token '{lexeme}' at {span}")]
    UnexpectedToken { lexeme: String, span: Span },

    /// The expression stopped in the middle of a construct.
    #[error("unexpected end of expression")]
    UnexpectedEof,

    /// A specific token was required and something else was found.
    #[error("expected {expected}, found '{found}' at {span}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },

    /// Input remained after a complete expression was parsed.
    #[error("trailing input '{lexeme}' at {span}")]
    TrailingTokens { lexeme: String, span: Span },

    /// The `in` operator was used without being enabled in the config.
    #[error("the 'in' operator is disabled (enable it via Config) at {span}")]
    MembershipDisabled { span: Span },
}

/// Either stage of parsing can fail; callers that just want "parse this
/// string" get both families under one roof.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    /// Stable error code, used by the diagnostic printer.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::Lex(_) => "E_LEX",
            ParseError::Syntax(_) => "E_SYNTAX",
        }
    }

    /// The source position the error points at, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Lex(LexError::UnrecognizedChar { span, .. })
            | ParseError::Lex(LexError::UnterminatedString { span })
            | ParseError::Syntax(SyntaxError::UnexpectedToken { span, .. })
            | ParseError::Syntax(SyntaxError::Expected { span, .. })
            | ParseError::Syntax(SyntaxError::TrailingTokens { span, .. })
            | ParseError::Syntax(SyntaxError::MembershipDisabled { span }) => Some(*span),
            ParseError::Syntax(SyntaxError::UnexpectedEof) => None,
        }
    }
}

/// Errors raised while evaluating a parsed tree against a binding.
///
/// An evaluation failure never poisons the tree: the same `Expression` can
/// be evaluated again with a different binding, including concurrently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// A variable in the tree has no entry in the binding.
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    /// A call to a function the registry does not know.
    #[error("undefined function '{name}'")]
    UndefinedFunction { name: String },

    /// A call with the wrong number of arguments.
    #[error("function '{name}' expects {expected} argument(s), got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// An operator or function applied to operand types it cannot handle.
    #[error("invalid operand types for '{operator}': {operands}")]
    Type { operator: String, operands: String },

    /// A numerically invalid operand, e.g. factorial of a non-integer.
    #[error("domain error: {message}")]
    Domain { message: String },

    /// Division or remainder by zero. Policy choice: fail fast instead of
    /// producing IEEE infinities, so bad input surfaces early.
    #[error("division by zero")]
    DivisionByZero,
}

impl EvalError {
    pub fn type_error(operator: impl Into<String>, operands: impl Into<String>) -> Self {
        EvalError::Type {
            operator: operator.into(),
            operands: operands.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        EvalError::Domain {
            message: message.into(),
        }
    }
}

/// Top-level error for the one-shot helpers (`eval_str` and friends).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Parse(ParseError::Lex(e))
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Parse(ParseError::Syntax(e))
    }
}
