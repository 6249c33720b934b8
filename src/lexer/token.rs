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

/// Represents the **category of a lexical token** in an expression.
///
/// ```text
/// Expression String → Lexer → TokenKind → Parser → Expression Tree
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal: `42`, `3.14`, `6.02e23`.
    Number,

    /// A quoted string literal, single- or double-quoted. The lexeme holds
    /// the unescaped contents.
    String,

    /// A user-defined name: variable names and function names.
    Identifier,

    /// An operator, including the keyword-operators `and`, `or`, `not`
    /// and `in`.
    Operator,

    /// Grouping and separators: `(`, `)`, `,`, `.`.
    Punctuation,

    /// End-of-input marker, always the final token.
    Eof,
}

/// A single lexical token with its source position.
///
/// Tokens are produced by the lexer, consumed by the parser and discarded
/// after the expression tree is built.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// True when this token is the given operator.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == op
    }

    /// True when this token is the given punctuation character.
    pub fn is_punctuation(&self, ch: char) -> bool {
        self.kind == TokenKind::Punctuation && self.lexeme.len() == 1 && self.lexeme.starts_with(ch)
    }
}
