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

use std::io::{self, BufRead};

use crate::value::{Binding, Value};

/// A lazy stream of `(line_number, binding)` pairs built from
/// newline-delimited CSV-style input.
///
/// Each input line is split on commas and the Nth field is assigned to the
/// Nth variable of the supplied variable order (normally
/// `Expression::variables()`). Fields beyond the variable list are ignored;
/// a short line simply leaves the remaining variables unbound, which the
/// evaluator then reports as an undefined variable.
///
/// This is deliberately decoupled from the evaluator: it knows nothing
/// about expressions, only about turning lines into bindings.
pub struct CsvBindings<R> {
    reader: R,
    variables: Vec<String>,
    line_number: usize,
}

impl<R: BufRead> CsvBindings<R> {
    pub fn new(reader: R, variables: &[String]) -> Self {
        Self {
            reader,
            variables: variables.to_vec(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for CsvBindings<R> {
    type Item = io::Result<(usize, Binding)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        match self.reader.read_line(&mut line) {
            Ok(0) => None,

            Ok(_) => {
                self.line_number += 1;
                let trimmed = line.trim_end_matches(['\n', '\r']);

                let mut binding = Binding::new();
                for (name, field) in self.variables.iter().zip(trimmed.split(',')) {
                    binding.insert(name.clone(), Value::from_cli_literal(field));
                }

                Some(Ok((self.line_number, binding)))
            }

            Err(e) => Some(Err(e)),
        }
    }
}
