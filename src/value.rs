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

use serde::{Deserialize, Serialize};

/// A binding of variable names to values, supplied fresh per evaluation.
/// The evaluator only ever reads from it.
pub type Binding = HashMap<String, Value>;

/// XEVAL runtime value representation.
///
/// This is the type that flows through the evaluator: every expression
/// ultimately evaluates to one of these. Literals in source text produce
/// numbers, strings and booleans; lists and objects only ever arrive
/// through bindings (typically deserialized from JSON by the HTTP
/// front-end) and exist so `in` and member access have something to work
/// against.
///
/// The untagged serde representation maps directly onto JSON scalars,
/// arrays and objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    /// Returns a stable type name string (useful for errors).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }

    /// XEVAL truthiness, used by `and`/`or`/`not` and the ternary condition:
    /// `true`, non-zero non-NaN numbers and non-empty strings are truthy;
    /// lists and objects are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Human-facing string form, used for stdout output and `||`
    /// concatenation. Not a serialization format; the HTTP adapter uses
    /// serde for that.
    pub fn stringify(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),

            Value::List(values) => {
                let inner = values
                    .iter()
                    .map(|v| v.stringify())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", inner)
            }

            Value::Object(_) => "[object]".to_string(),
        }
    }

    /// Loose equality (`==`):
    /// - scalars compare by value
    /// - lists deep-compare
    /// - objects are never equal, mismatched types are never equal
    pub fn equals_loose(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Bool(x), Value::Bool(y)) => x == y,

            (Value::List(x), Value::List(y)) => {
                if x.len() != y.len() {
                    return false;
                }
                x.iter().zip(y.iter()).all(|(a, b)| Value::equals_loose(a, b))
            }

            _ => false,
        }
    }

    /// Attempts to extract a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Coercion used by `||` concatenation and the string side of `in`:
    /// numbers and strings coerce, everything else refuses.
    pub fn coerce_to_string(&self) -> Option<String> {
        match self {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Parses a CLI-supplied literal (`name=value` pairs and stdin CSV
    /// fields): number first, then boolean, otherwise the raw string.
    pub fn from_cli_literal(raw: &str) -> Value {
        let raw = raw.trim();

        if let Ok(n) = raw.parse::<f64>() {
            return Value::Number(n);
        }

        match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Number(1.0).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
        assert!(!Value::String("".into()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn loose_equality() {
        assert!(Value::equals_loose(&Value::Number(2.0), &Value::Number(2.0)));
        assert!(!Value::equals_loose(
            &Value::Number(2.0),
            &Value::String("2".into())
        ));
        assert!(Value::equals_loose(
            &Value::List(vec![Value::Number(1.0), Value::Bool(true)]),
            &Value::List(vec![Value::Number(1.0), Value::Bool(true)]),
        ));
        assert!(!Value::equals_loose(
            &Value::Object(HashMap::new()),
            &Value::Object(HashMap::new()),
        ));
    }

    #[test]
    fn cli_literal_coercion() {
        assert_eq!(Value::from_cli_literal(" 2.5 "), Value::Number(2.5));
        assert_eq!(Value::from_cli_literal("true"), Value::Bool(true));
        assert_eq!(
            Value::from_cli_literal("hello"),
            Value::String("hello".into())
        );
    }

    #[test]
    fn untagged_json_round_trip() {
        let v: Value = serde_json::from_str(r#"{"xs": [1, "a", true]}"#).unwrap();
        match &v {
            Value::Object(fields) => match fields.get("xs") {
                Some(Value::List(items)) => assert_eq!(items.len(), 3),
                other => panic!("expected list, got {:?}", other),
            },
            other => panic!("expected object, got {:?}", other),
        }

        assert_eq!(serde_json::to_string(&Value::Number(5.0)).unwrap(), "5.0");
        assert_eq!(
            serde_json::to_string(&Value::String("big".into())).unwrap(),
            "\"big\""
        );
    }

    #[test]
    fn stringify_forms() {
        assert_eq!(Value::Number(14.0).stringify(), "14");
        assert_eq!(Value::String("big".into()).stringify(), "big");
        assert_eq!(
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)]).stringify(),
            "[1, 2]"
        );
    }
}
