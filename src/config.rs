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

use std::collections::HashMap;

use crate::error::EvalError;
use crate::eval::functions::FunctionRegistry;
use crate::value::Value;

/// Parser and evaluator configuration.
///
/// Built once at host startup and shared (behind an `Arc`) by every
/// expression parsed against it. There is deliberately no way to mutate a
/// config after parsing starts: the builder methods consume `self`, and
/// both the function registry and the constant table are frozen inside the
/// finished value.
#[derive(Debug, Clone)]
pub struct Config {
    membership_test: bool,
    functions: FunctionRegistry,
    constants: HashMap<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        let mut constants = HashMap::new();
        constants.insert("PI".to_string(), Value::Number(std::f64::consts::PI));
        constants.insert("E".to_string(), Value::Number(std::f64::consts::E));

        Self {
            membership_test: false,
            functions: FunctionRegistry::builtins(),
            constants,
        }
    }

    /// Enables or disables the `in` membership operator (off by default;
    /// when off, `in` is a syntax error rather than a silent pass-through).
    pub fn with_membership_test(mut self, allow: bool) -> Self {
        self.membership_test = allow;
        self
    }

    /// Registers an additional function under `name` with a fixed arity.
    pub fn with_function<F>(mut self, name: &str, arity: usize, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.functions.register(name, arity, body);
        self
    }

    /// Adds a named constant, folded into a literal at parse time.
    pub fn with_constant(mut self, name: &str, value: Value) -> Self {
        self.constants.insert(name.to_string(), value);
        self
    }

    pub fn membership_enabled(&self) -> bool {
        self.membership_test
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub(crate) fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
