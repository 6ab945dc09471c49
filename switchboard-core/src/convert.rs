//! Type checkers for usage-string argument annotations.
//!
//! Each placeholder in a usage string selects a checker by its type tag. A
//! checker maps a raw command line token to a typed `serde_json::Value`, or
//! fails when the token is not a valid literal of that type. The tag table is
//! an open lookup: unknown tags fall back to the `string` checker.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;

/// Error produced when a token is not a valid literal of the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("expected {expected}, got: {value}")]
pub struct ConvertError {
    /// Name of the expected type
    pub expected: &'static str,

    /// The offending token
    pub value: String,
}

/// A type checker: maps a raw token to a typed value.
pub type Converter = fn(&str) -> Result<Value, ConvertError>;

fn string_checker(value: &str) -> Result<Value, ConvertError> {
    Ok(json!(value))
}

/// Accepts the canonical boolean literal forms, nothing else.
fn bool_checker(value: &str) -> Result<Value, ConvertError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(json!(true)),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(json!(false)),
        _ => Err(ConvertError {
            expected: "bool",
            value: value.to_string(),
        }),
    }
}

/// Accepts a base-10 signed 64-bit integer literal; overflow is a failure.
fn int_checker(value: &str) -> Result<Value, ConvertError> {
    value
        .parse::<i64>()
        .map(|n| json!(n))
        .map_err(|_| ConvertError {
            expected: "int",
            value: value.to_string(),
        })
}

/// Accepts a decimal or exponential numeric literal. Literals that parse to a
/// non-finite float are rejected: the JSON value model has no representation
/// for them.
fn float_checker(value: &str) -> Result<Value, ConvertError> {
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ConvertError {
            expected: "float",
            value: value.to_string(),
        })
}

/// Look up the checker for a type tag.
///
/// An absent tag selects the `string` checker. Unrecognized tags also fall
/// back to `string`, with a warning naming the tag so typos are visible.
pub fn converter_for(tag: &str) -> Converter {
    match tag {
        "" | "string" => string_checker,
        "bool" => bool_checker,
        "int" => int_checker,
        "float" => float_checker,
        other => {
            warn!(tag = other, "unrecognized type tag, treating as string");
            string_checker
        }
    }
}
