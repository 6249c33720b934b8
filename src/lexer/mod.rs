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

/// Core lexer state machine:
/// - Owns the `Lexer` struct and all scanning logic
pub mod lexer;

/// Token and token-kind definitions shared with the parser.
pub mod token;

/// Keyword-operator classification (`and` / `or` / `not` / `in`).
pub mod keywords;

pub use token::{Token, TokenKind};

use crate::error::LexError;

/// Converts a raw expression string into a sequence of tokens, terminated
/// by an `Eof` marker.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = lexer::Lexer::new(source);
    lexer.scan_tokens()?;
    Ok(lexer.tokens)
}
