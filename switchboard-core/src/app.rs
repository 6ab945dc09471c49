//! Command registry, argument binder, and dispatch.
//!
//! The [`App`] holds every registered command. Registration compiles the
//! usage string into an argument schema and stores it next to the handler;
//! dispatch selects a command by its first process-argument token, binds the
//! remaining tokens to the schema (converting each through its type checker
//! or substituting declared defaults), and invokes the handler with the
//! converted values.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{DispatchError, Result};
use crate::usage::{ArgSpec, parse_usage};

/// Handler adapter invoked with the bound argument values, in declaration
/// order. Handlers destructure the values positionally; arity is implied by
/// the usage string and is not statically checked against the closure body.
pub type Handler = Box<dyn Fn(&[Value])>;

/// A registered command: declared name, retained usage text, compiled
/// argument schema, and the handler to invoke.
pub struct Command {
    name: String,
    usage: String,
    args: Vec<ArgSpec>,
    handler: Handler,
}

impl Command {
    /// Name the command is selected by (first token of the usage string).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original usage string, retained for display.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The compiled argument schema, in positional order.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    /// Number of arguments that cannot be defaulted. Required arguments
    /// precede optional ones, so this is also the minimum token count.
    fn min_arg_count(&self) -> usize {
        self.args.iter().filter(|a| !a.is_optional()).count()
    }

    fn usage_line(&self, program: &str) -> String {
        format!("usage: {} {}\n", program, self.usage)
    }
}

/// The process-wide command registry.
///
/// Populated once during application setup via [`App::command`], then read
/// only by [`App::run`]. The command list is append-only; registration order
/// is preserved for the combined usage listing.
#[derive(Default)]
pub struct App {
    commands: Vec<Command>,
}

impl App {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command from its usage string.
    ///
    /// Duplicate names are permitted; dispatch prefers the most recent
    /// registration.
    ///
    /// # Panics
    ///
    /// Panics when the usage string is malformed: the first token is a
    /// placeholder, a default literal is rejected by its type checker, or a
    /// required argument is declared after an optional one. These are
    /// programmer errors and should abort application startup.
    pub fn command<F>(&mut self, usage: &str, handler: F)
    where
        F: Fn(&[Value]) + 'static,
    {
        match parse_usage(usage) {
            Ok((name, args)) => self.commands.push(Command {
                name,
                usage: usage.to_string(),
                args,
                handler: Box::new(handler),
            }),
            Err(err) => panic!("{}", err),
        }
    }

    /// The registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Find the command registered under `name`, preferring the most recent
    /// registration when names collide.
    fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().rev().find(|c| c.name == name)
    }

    /// Combined usage listing for every registered command, in registration
    /// order. With more than one command the `usage:` header sits on its own
    /// line.
    pub fn usage_text(&self, program: &str) -> String {
        let mut out = String::from("usage:");
        if self.commands.len() > 1 {
            out.push('\n');
        }
        for command in &self.commands {
            out.push_str(&format!(" {} {}\n", program, command.usage));
        }
        out
    }

    /// Match `argv` against the registry and invoke the selected handler.
    ///
    /// `argv[0]` is the invocation path; the first trailing token selects the
    /// command and the rest bind to its arguments. Tokens beyond the declared
    /// argument count are ignored. The process-facing entry point is
    /// [`App::run`]; this `Result`-returning form is what the tests exercise.
    pub fn dispatch(&self, argv: &[String]) -> Result<()> {
        let tokens = argv.get(1..).unwrap_or_default();
        let name = tokens.first().ok_or(DispatchError::MissingCommand)?;
        let command = self
            .find(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.clone()))?;

        let arg_tokens = &tokens[1..];
        if arg_tokens.len() < command.min_arg_count() {
            return Err(DispatchError::MissingArguments {
                command: command.name.clone(),
                required: command.min_arg_count(),
                supplied: arg_tokens.len(),
            });
        }

        let values = bind(command, arg_tokens)?;
        debug!(command = %command.name, args = values.len(), "dispatching");
        (command.handler)(&values);
        Ok(())
    }

    /// Run the app against the full process argument list.
    ///
    /// Derives the program display name from the invocation path, dispatches,
    /// and on failure prints usage to standard error and exits the process
    /// with status 1. A missing or unknown command prints the combined
    /// listing; too few arguments or a rejected token prints the single
    /// matched command's usage line. On success the handler has run and
    /// control returns to the caller.
    pub fn run(&self, argv: &[String]) {
        let program = argv
            .first()
            .map(|path| display_name(path))
            .unwrap_or_default();

        if let Err(err) = self.dispatch(argv) {
            match &err {
                DispatchError::MissingCommand | DispatchError::UnknownCommand(_) => {
                    eprint!("{}", self.usage_text(&program));
                }
                DispatchError::MissingArguments { command, .. }
                | DispatchError::InvalidValue { command, .. } => {
                    if let Some(matched) = self.find(command) {
                        eprint!("{}", matched.usage_line(&program));
                    }
                }
            }
            std::process::exit(1);
        }
    }
}

/// Bind raw tokens to a command's argument schema, positionally.
///
/// A supplied token is always converted, even for an optional argument; the
/// default is substituted only when the token is absent. The first conversion
/// failure aborts binding, so a handler never sees partial input.
fn bind(command: &Command, tokens: &[String]) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(command.args().len());

    for (i, arg) in command.args().iter().enumerate() {
        let value = match tokens.get(i) {
            Some(token) => arg.convert(token).map_err(|source| DispatchError::InvalidValue {
                command: command.name.clone(),
                arg: arg.name.clone(),
                source,
            })?,
            None => match &arg.default {
                Some(default) => default.clone(),
                // Unreachable after the min-count check: required arguments
                // precede optional ones.
                None => {
                    return Err(DispatchError::MissingArguments {
                        command: command.name.clone(),
                        required: command.min_arg_count(),
                        supplied: tokens.len(),
                    });
                }
            },
        };
        values.push(value);
    }

    Ok(values)
}

/// Display name for the program, derived from the invocation path.
fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
