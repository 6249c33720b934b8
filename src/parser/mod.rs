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

/// Core parser orchestration:
/// - Owns the `Parser` struct
/// - Exposes the main `parse(tokens, config)` entry point
pub mod parser;

/// Expression-level parsing:
/// - ternary → or → and → comparison → additive → multiplicative → unary
///   → power → postfix → call/member → primary
pub mod expressions;

/// Shared parser helpers:
/// - token matching
/// - lookahead checks
/// - operator / punctuation consumption
pub mod helpers;

/// Re-export the public parse entry point so callers can use:
/// `crate::parser::parse(...)`
pub use parser::parse;
