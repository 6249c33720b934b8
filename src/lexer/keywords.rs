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

/// Determines whether an identifier is actually a **keyword-operator**.
///
/// `and`, `or`, `not` and `in` read like identifiers but participate in the
/// operator grammar, so the lexer re-tags them as `TokenKind::Operator`
/// before the parser ever sees them. Everything else scanned as a word stays
/// an ordinary identifier (including `true`/`false`, which the parser folds
/// into literals).
pub fn is_keyword_operator(word: &str) -> bool {
    matches!(word, "and" | "or" | "not" | "in")
}
