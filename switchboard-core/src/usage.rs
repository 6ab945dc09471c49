//! Usage-string parsing.
//!
//! A usage string declares a command name followed by positional argument
//! placeholders of the form `<name[:type][=default]>`, for example:
//!
//! ```text
//! count <from:int> <to:int> <double:bool=false>
//! ```
//!
//! Parsing compiles the string into the command's name plus an ordered list
//! of [`ArgSpec`]s. Default literals are converted by the argument's own type
//! checker at parse time, so a bad default surfaces at registration rather
//! than at dispatch.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;

use crate::convert::{ConvertError, Converter, converter_for};

/// Matches one placeholder: `<name>`, `<name:type>`, `<name=default>`,
/// `<name:type=default>`. Default literals are limited to word characters
/// and dots.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)(?::(\w+))?(?:=([\w.]+))?>").expect("placeholder regex"));

/// Errors raised while compiling a usage string.
///
/// These are programmer errors in the registration call, not runtime input:
/// [`App::command`](crate::App::command) panics on them so a bad usage string
/// aborts application startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    /// The first token of the usage string was a placeholder, so the command
    /// has no name.
    #[error("first part of usage must be the command name, got placeholder: {0}")]
    MissingCommandName(String),

    /// A default literal was rejected by its own type checker.
    #[error("invalid default value for <{name}:{tag}>: {source}")]
    InvalidDefault {
        name: String,
        tag: String,
        #[source]
        source: ConvertError,
    },

    /// A required argument was declared after an optional one.
    #[error("optional arguments must come after required arguments: <{0}> has no default")]
    RequiredAfterOptional(String),
}

/// One positional argument compiled from a usage-string placeholder.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    /// Identifier from the placeholder, used for usage display and error text
    pub name: String,

    /// Raw type tag from the placeholder; empty when the tag was omitted
    pub type_tag: String,

    /// Converted default value; presence makes the argument optional
    pub default: Option<Value>,

    converter: Converter,
}

impl ArgSpec {
    /// An argument with a default can be omitted from the command line.
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    /// Run this argument's type checker over a raw token.
    pub fn convert(&self, token: &str) -> Result<Value, ConvertError> {
        (self.converter)(token)
    }

    fn from_captures(caps: &Captures<'_>) -> Result<Self, UsageError> {
        let name = caps[1].to_string();
        let type_tag = caps.get(2).map(|m| m.as_str()).unwrap_or("").to_string();
        let converter = converter_for(&type_tag);

        let default = match caps.get(3) {
            Some(literal) => {
                let value =
                    converter(literal.as_str()).map_err(|source| UsageError::InvalidDefault {
                        name: name.clone(),
                        tag: type_tag.clone(),
                        source,
                    })?;
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            name,
            type_tag,
            default,
            converter,
        })
    }
}

/// Compile a usage string into the command name and its argument schema.
///
/// Placeholders are scanned left to right over the whole string; the command
/// name is the first whitespace-delimited token and must not itself be a
/// placeholder. Once an optional (defaulted) argument appears, every later
/// argument must also be optional.
pub fn parse_usage(usage: &str) -> Result<(String, Vec<ArgSpec>), UsageError> {
    let name = usage.split_whitespace().next().unwrap_or_default();
    if name.starts_with('<') {
        return Err(UsageError::MissingCommandName(name.to_string()));
    }

    let mut args = Vec::new();
    let mut seen_optional = false;
    for caps in PLACEHOLDER.captures_iter(usage) {
        let spec = ArgSpec::from_captures(&caps)?;
        if seen_optional && !spec.is_optional() {
            return Err(UsageError::RequiredAfterOptional(spec.name));
        }
        seen_optional = seen_optional || spec.is_optional();
        args.push(spec);
    }

    Ok((name.to_string(), args))
}
