//! Error types for command dispatch.

use serde::Serialize;
use thiserror::Error;

use crate::convert::ConvertError;

/// Errors raised while matching process arguments against the registry.
///
/// These describe user input, not programmer mistakes: [`App::run`](crate::App::run)
/// turns each of them into a usage message on standard error and a non-zero
/// exit status. They surface as values only through the crate-internal
/// [`App::dispatch`](crate::App::dispatch) path used by tests.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DispatchError {
    /// No command token was supplied after the program path.
    #[error("no command supplied")]
    MissingCommand,

    /// The command token matched no registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Fewer tokens were supplied than the command's required argument count.
    #[error("{command}: expected at least {required} argument(s), got {supplied}")]
    MissingArguments {
        command: String,
        required: usize,
        supplied: usize,
    },

    /// A token was rejected by its argument's type checker.
    #[error("{command}: invalid value for <{arg}>: {source}")]
    InvalidValue {
        command: String,
        arg: String,
        #[source]
        source: ConvertError,
    },
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
