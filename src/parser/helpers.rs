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

use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};
use crate::parser::parser::Parser;

/// Shared parser helpers: token matching, lookahead checks and consumption.
/// The token stream always ends in `Eof`, so `peek` never runs off the end.
impl Parser<'_> {
    pub(crate) fn match_operator(&mut self, op: &str) -> bool {
        if self.peek().is_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume_operator(&mut self, op: &'static str) -> Result<(), SyntaxError> {
        if self.match_operator(op) {
            Ok(())
        } else {
            Err(self.expected(op))
        }
    }

    pub(crate) fn match_punctuation(&mut self, ch: char) -> bool {
        if self.check_punctuation(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check_punctuation(&self, ch: char) -> bool {
        self.peek().is_punctuation(ch)
    }

    pub(crate) fn consume_punctuation(
        &mut self,
        ch: char,
        expected: &'static str,
    ) -> Result<(), SyntaxError> {
        if self.match_punctuation(ch) {
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    pub(crate) fn consume_identifier(
        &mut self,
        expected: &'static str,
    ) -> Result<String, SyntaxError> {
        if self.peek().kind == TokenKind::Identifier {
            Ok(self.advance().lexeme)
        } else {
            Err(self.expected(expected))
        }
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Lookahead that clamps to the trailing `Eof` token.
    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn expected(&self, expected: &'static str) -> SyntaxError {
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            SyntaxError::UnexpectedEof
        } else {
            SyntaxError::Expected {
                expected,
                found: token.lexeme.clone(),
                span: token.span,
            }
        }
    }
}
