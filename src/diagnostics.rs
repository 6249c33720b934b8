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

use crate::error::ParseError;
use crate::span::Span;

/// Responsible for rendering human-friendly, compiler-style diagnostics
/// for parse errors.
///
/// This printer:
/// - Formats errors with a stable code and line/column information
/// - Displays the offending expression line
/// - Highlights the exact error position using a caret (`^`)
///
/// The output is intentionally inspired by `rustc` diagnostics, but
/// simplified and designed to remain readable without color. The core
/// never prints anything itself; this lives on the CLI side of the fence.
pub struct DiagnosticPrinter {
    /// A short label for where the expression came from (e.g. `expression`).
    label: String,

    /// The full expression text, kept so the offending line can be shown.
    source: String,
}

impl DiagnosticPrinter {
    pub fn new(label: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
        }
    }

    /// Renders the diagnostic into a string.
    ///
    /// # Output Example
    /// ```text
    /// error[E_SYNTAX]: trailing input ')' at 1:8
    ///   --> expression:1:8
    ///    |
    ///  1 | (2 + 3))
    ///    |        ^
    /// ```
    pub fn render(&self, error: &ParseError) -> String {
        let mut out = format!("error[{}]: {}\n", error.code(), error);

        if let Some(Span { line, column }) = error.span() {
            let lines: Vec<&str> = self.source.lines().collect();
            let src_line = lines.get(line.saturating_sub(1)).unwrap_or(&"");

            out.push_str(&format!("  --> {}:{}:{}\n", self.label, line, column + 1));
            out.push_str("   |\n");
            out.push_str(&format!("{:>3} | {}\n", line, src_line));

            let mut underline = String::new();
            for _ in 0..column {
                underline.push(' ');
            }
            underline.push('^');
            out.push_str(&format!("   | {}\n", underline));
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &ParseError) {
        eprint!("{}", self.render(error));
    }
}
