/*
 * ==========================================================================
 * XEVAL - Expression Evaluator
 * Builtin Function Registry
 * ==========================================================================
 *
 * This module defines the native Rust-backed implementations of the
 * builtin functions available inside expressions.
 *
 * It provides:
 *   - Rounding: floor, ceil, round, trunc
 *   - Powers & Roots: pow, sqrt, exp, ln, log, log2, log10
 *   - Magnitude: abs, sign
 *   - Trigonometry: sin, cos, tan, asin, acos, atan, atan2,
 *     sinh, cosh, tanh
 *   - Aggregates: min, max
 *   - Randomness: random
 *   - Strings/Lists: length
 *
 * The registry is immutable once evaluation starts: hosts extend it
 * through `Config` before parsing, never during evaluation.
 *
 * --------------------------------------------------------------------------
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * Website:  https://www.pawx-lang.com
 * GitHub:   https://github.com/samwilcox/xeval
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
 *     https://license.pawx-lang.com
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::EvalError;
use crate::value::Value;

/// Native host function: takes evaluated argument values, returns a value
/// or an evaluation error. `Send + Sync` so one parsed expression can be
/// evaluated from many threads.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

#[derive(Clone)]
pub struct Function {
    pub arity: usize,
    pub body: NativeFn,
}

/// Mapping from function name to (arity, implementation).
#[derive(Clone)]
pub struct FunctionRegistry {
    entries: HashMap<String, Function>,
}

impl FunctionRegistry {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates the default registry with every builtin installed.
    pub fn builtins() -> Self {
        let mut registry = Self::empty();

        // ---------------------------------------------------------------
        // Rounding
        // ---------------------------------------------------------------
        unary_math(&mut registry, "floor", f64::floor);
        unary_math(&mut registry, "ceil", f64::ceil);
        unary_math(&mut registry, "round", f64::round);
        unary_math(&mut registry, "trunc", f64::trunc);

        // ---------------------------------------------------------------
        // Powers & Roots
        // ---------------------------------------------------------------
        unary_math(&mut registry, "sqrt", f64::sqrt);
        unary_math(&mut registry, "exp", f64::exp);
        unary_math(&mut registry, "ln", f64::ln);
        unary_math(&mut registry, "log", f64::log10);
        unary_math(&mut registry, "log2", f64::log2);
        unary_math(&mut registry, "log10", f64::log10);
        binary_math(&mut registry, "pow", f64::powf);

        // ---------------------------------------------------------------
        // Magnitude
        // ---------------------------------------------------------------
        unary_math(&mut registry, "abs", f64::abs);
        unary_math(&mut registry, "sign", |x| if x == 0.0 { 0.0 } else { x.signum() });

        // ---------------------------------------------------------------
        // Trigonometry
        // ---------------------------------------------------------------
        unary_math(&mut registry, "sin", f64::sin);
        unary_math(&mut registry, "cos", f64::cos);
        unary_math(&mut registry, "tan", f64::tan);
        unary_math(&mut registry, "asin", f64::asin);
        unary_math(&mut registry, "acos", f64::acos);
        unary_math(&mut registry, "atan", f64::atan);
        binary_math(&mut registry, "atan2", f64::atan2);
        unary_math(&mut registry, "sinh", f64::sinh);
        unary_math(&mut registry, "cosh", f64::cosh);
        unary_math(&mut registry, "tanh", f64::tanh);

        // ---------------------------------------------------------------
        // Aggregates
        // ---------------------------------------------------------------
        binary_math(&mut registry, "min", f64::min);
        binary_math(&mut registry, "max", f64::max);

        // ---------------------------------------------------------------
        // Randomness
        // ---------------------------------------------------------------
        registry.register("random", 0, |_args| Ok(Value::Number(rand::random::<f64>())));

        // ---------------------------------------------------------------
        // Strings / Lists
        // ---------------------------------------------------------------
        registry.register("length", 1, |args| match &args[0] {
            Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
            Value::List(items) => Ok(Value::Number(items.len() as f64)),
            other => Err(EvalError::type_error("length", other.type_name())),
        });

        registry
    }

    pub fn register<F>(&mut self, name: &str, arity: usize, body: F)
    where
        F: Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        self.entries.insert(
            name.to_string(),
            Function {
                arity,
                body: Arc::new(body),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.entries.get(name)
    }

    /// True when `name` is registered with arity 1. The parser uses this to
    /// accept prefix application (`sqrt 16`).
    pub fn is_unary(&self, name: &str) -> bool {
        self.entries.get(name).map(|f| f.arity == 1).unwrap_or(false)
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}

fn unary_math(registry: &mut FunctionRegistry, name: &'static str, f: fn(f64) -> f64) {
    registry.register(name, 1, move |args| {
        let x = expect_number(name, &args[0])?;
        Ok(Value::Number(f(x)))
    });
}

fn binary_math(registry: &mut FunctionRegistry, name: &'static str, f: fn(f64, f64) -> f64) {
    registry.register(name, 2, move |args| {
        let a = expect_number(name, &args[0])?;
        let b = expect_number(name, &args[1])?;
        Ok(Value::Number(f(a, b)))
    });
}

fn expect_number(name: &str, value: &Value) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| EvalError::type_error(name, value.type_name()))
}

/// Factorial over the numeric domain: defined for non-negative integers,
/// anything else is a domain error. Large operands saturate to infinity.
pub(crate) fn factorial(n: f64) -> Result<f64, EvalError> {
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return Err(EvalError::domain(format!(
            "factorial is only defined for non-negative integers, got {}",
            n
        )));
    }

    let mut acc = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        acc *= i;
        if acc.is_infinite() {
            break;
        }
        i += 1.0;
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_cover_the_documented_set() {
        let registry = FunctionRegistry::builtins();
        for name in [
            "sqrt", "abs", "round", "floor", "ceil", "trunc", "sign", "exp", "ln", "log", "log2",
            "log10", "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "min",
            "max", "pow", "atan2", "random", "length",
        ] {
            assert!(registry.get(name).is_some(), "missing builtin {}", name);
        }

        assert!(registry.is_unary("sqrt"));
        assert!(!registry.is_unary("min"));
        assert!(!registry.is_unary("random"));
        assert!(!registry.is_unary("nope"));
    }

    #[test]
    fn unary_builtins_reject_non_numbers() {
        let registry = FunctionRegistry::builtins();
        let sqrt = registry.get("sqrt").unwrap();
        let err = (sqrt.body)(&[Value::String("x".into())]).unwrap_err();
        assert!(matches!(err, EvalError::Type { .. }));
    }

    #[test]
    fn length_works_on_strings_and_lists() {
        let registry = FunctionRegistry::builtins();
        let length = registry.get("length").unwrap();

        assert_eq!(
            (length.body)(&[Value::String("héllo".into())]).unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            (length.body)(&[Value::List(vec![Value::Bool(true)])]).unwrap(),
            Value::Number(1.0)
        );
        assert!((length.body)(&[Value::Number(1.0)]).is_err());
    }

    #[test]
    fn factorial_basics() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert!(factorial(200.0).unwrap().is_infinite());
        assert!(factorial(-1.0).is_err());
        assert!(factorial(2.5).is_err());
        assert!(factorial(f64::NAN).is_err());
    }
}
