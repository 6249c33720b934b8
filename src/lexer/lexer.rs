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

use crate::error::LexError;
use crate::lexer::keywords::is_keyword_operator;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
    pub tokens: Vec<Token>,
}

impl Lexer {
    /// Creates a new lexer instance from a raw expression string.
    ///
    /// This initializes the internal scanning state and prepares the lexer
    /// to convert the expression text into a stream of lexical tokens.
    ///
    /// # Parameters
    /// - `source`: A UTF-8 encoded expression string.
    ///
    /// # Returns
    /// A fully initialized `Lexer` with:
    /// - Cursor at position `0`
    /// - Line counter set to `1`, column counter set to `0`
    /// - Empty token output buffer
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
        }
    }

    /// Performs complete lexical analysis over the entire input.
    ///
    /// This method repeatedly scans individual tokens until the end of
    /// the input is reached, then appends a final `Eof` token.
    ///
    /// # Behavior
    /// - Ignores whitespace
    /// - Emits structured `Token` objects with source spans
    /// - Guarantees a terminating `TokenKind::Eof` marker
    ///
    /// # Errors
    /// Returns `LexError` on a character no token can start with, or on an
    /// unterminated string literal.
    pub fn scan_tokens(&mut self) -> Result<(), LexError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: "".to_string(),
            span: self.position(),
        });

        Ok(())
    }

    /// Scans and emits a single token from the input stream.
    ///
    /// Routes to specialized scanners for:
    /// - String literals (single- or double-quoted, with escapes)
    /// - Numbers (optional fraction and exponent)
    /// - Identifiers and the keyword-operators `and`/`or`/`not`/`in`
    /// - Multi-character operators (`==`, `!=`, `>=`, `<=`, `||`)
    /// - Single-character operators and punctuation
    fn scan_token(&mut self) -> Result<(), LexError> {
        let span = self.position();
        let ch = self.advance();

        match ch {
            // Whitespace (advance() already tracks newlines)
            ' ' | '\r' | '\t' | '\n' => Ok(()),

            // Strings (single or double quoted)
            '"' | '\'' => self.string_with_delimiter(ch, span),

            // Numbers
            '0'..='9' => {
                self.number(span);
                Ok(())
            }

            // Identifiers / keyword-operators
            'a'..='z' | 'A'..='Z' | '_' => {
                self.identifier(span);
                Ok(())
            }

            // Multi-char operators: ==, !=, >=, <=
            '!' | '<' | '>' => {
                let mut lex = ch.to_string();
                if self.peek() == '=' {
                    lex.push(self.advance());
                }
                self.push_token(TokenKind::Operator, lex, span);
                Ok(())
            }

            // `=` only exists doubled
            '=' => {
                if self.peek() == '=' {
                    self.advance();
                    self.push_token(TokenKind::Operator, "==".to_string(), span);
                    Ok(())
                } else {
                    Err(LexError::UnrecognizedChar { ch, span })
                }
            }

            // `|` only exists doubled (string concatenation)
            '|' => {
                if self.peek() == '|' {
                    self.advance();
                    self.push_token(TokenKind::Operator, "||".to_string(), span);
                    Ok(())
                } else {
                    Err(LexError::UnrecognizedChar { ch, span })
                }
            }

            // Single-char operators
            '+' | '-' | '*' | '/' | '%' | '^' | '?' | ':' => {
                self.push_token(TokenKind::Operator, ch.to_string(), span);
                Ok(())
            }

            // Punctuation
            '(' | ')' | ',' | '.' => {
                self.push_token(TokenKind::Punctuation, ch.to_string(), span);
                Ok(())
            }

            // Everything else is a lex error, not a silent symbol
            _ => Err(LexError::UnrecognizedChar { ch, span }),
        }
    }

    /// Scans a string literal body after the opening quote was consumed.
    ///
    /// Supports backslash escapes: `\n`, `\t`, `\r`, and any other escaped
    /// character (notably `\\`, `\'`, `\"`) stands for itself. The emitted
    /// lexeme holds the **unescaped** contents.
    fn string_with_delimiter(&mut self, delimiter: char, span: Span) -> Result<(), LexError> {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(LexError::UnterminatedString { span });
            }

            let ch = self.advance();

            if ch == delimiter {
                break;
            }

            if ch == '\\' {
                if self.is_at_end() {
                    return Err(LexError::UnterminatedString { span });
                }
                let escaped = self.advance();
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                value.push(ch);
            }
        }

        self.push_token(TokenKind::String, value, span);
        Ok(())
    }

    /// Scans an identifier starting at the already-consumed first character.
    ///
    /// Keyword-operators (`and`, `or`, `not`, `in`) are re-tagged as
    /// `TokenKind::Operator`; everything else is an `Identifier`.
    fn identifier(&mut self, span: Span) {
        let start = self.current - 1;

        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.chars[start..self.current].iter().collect();

        let kind = if is_keyword_operator(&text) {
            TokenKind::Operator
        } else {
            TokenKind::Identifier
        };

        self.push_token(kind, text, span);
    }

    /// Scans a decimal number: digits, an optional fractional part, and an
    /// optional exponent (`e`/`E` with optional sign). The first digit was
    /// already consumed.
    fn number(&mut self, span: Span) {
        let start = self.current - 1;

        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Exponent is only consumed when a digit actually follows, so
        // "2e" stays a number followed by an identifier.
        if self.peek() == 'e' || self.peek() == 'E' {
            let exponent_digits = if self.peek_next() == '+' || self.peek_next() == '-' {
                self.peek_at(2).is_ascii_digit()
            } else {
                self.peek_next().is_ascii_digit()
            };

            if exponent_digits {
                self.advance(); // e / E
                if self.peek() == '+' || self.peek() == '-' {
                    self.advance();
                }
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            }
        }

        let value: String = self.chars[start..self.current].iter().collect();
        self.push_token(TokenKind::Number, value, span);
    }

    // ---------- low-level cursor helpers ----------

    fn push_token(&mut self, kind: TokenKind, lexeme: String, span: Span) {
        self.tokens.push(Token { kind, lexeme, span });
    }

    fn position(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn advance(&mut self) -> char {
        let ch = self.chars[self.current];
        self.current += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        ch
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_next(&self) -> char {
        self.peek_at(1)
    }

    fn peek_at(&self, offset: usize) -> char {
        if self.current + offset >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + offset]
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}
