/*
 * ============================================================================
 * XEVAL - Expression Evaluator
 * ============================================================================
 *
 * Library Entry Point
 * -------------------
 * Parses mathematical expression strings into immutable trees and
 * evaluates them against variable bindings:
 *
 *   let expr = xeval::parse("(x + 5) / y")?;
 *   assert_eq!(expr.variables(), ["x", "y"]);
 *   let result = expr.evaluate(&binding)?;
 *
 * The tree is built once and may be evaluated many times, including from
 * multiple threads at once, against different bindings. Behavior is tuned
 * through an immutable `Config` (builtin functions, named constants, the
 * `in` membership operator), constructed once at host startup.
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

pub mod ast;
pub mod config;
pub mod csv;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod expression;
pub mod lexer;
pub mod parser;
pub mod server;
pub mod span;
pub mod value;

pub use config::Config;
pub use error::{Error, EvalError, LexError, ParseError, SyntaxError};
pub use expression::Expression;
pub use span::Span;
pub use value::{Binding, Value};

use std::sync::{Arc, OnceLock};

fn default_config() -> Arc<Config> {
    static DEFAULT: OnceLock<Arc<Config>> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(Config::default())).clone()
}

/// Parses an expression string with the default configuration.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    parse_with_config(input, default_config())
}

/// Parses an expression string against an explicit configuration. The
/// configuration is captured by the returned expression so later
/// evaluations use the same function registry it was parsed with.
pub fn parse_with_config(input: &str, config: Arc<Config>) -> Result<Expression, ParseError> {
    let tokens = lexer::tokenize(input)?;
    let root = parser::parse(tokens, &config)?;
    Ok(Expression::new(root, config))
}

/// Parses and evaluates a variable-free expression in one call.
pub fn eval_str(input: &str) -> Result<Value, Error> {
    eval_str_with_binding(input, &Binding::new())
}

/// Parses and evaluates an expression against the given binding.
pub fn eval_str_with_binding(input: &str, binding: &Binding) -> Result<Value, Error> {
    let expr = parse(input)?;
    Ok(expr.evaluate(binding)?)
}
