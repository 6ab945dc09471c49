//! Declarative command-line construction from usage strings.
//!
//! Commands are registered with a human-readable usage string describing the
//! command name and its typed, optionally-defaulted positional arguments,
//! plus a handler closure. At run time the library parses the process
//! arguments, selects the matching command, converts each token with the
//! declared type checker (substituting defaults for omitted optional
//! arguments), and invokes the handler with the converted values.
//!
//! ```no_run
//! use switchboard_core::App;
//!
//! let mut app = App::new();
//!
//! app.command("hello <name:string>", |args| {
//!     println!("hello {}", args[0].as_str().unwrap_or_default());
//! });
//!
//! let argv: Vec<String> = std::env::args().collect();
//! app.run(&argv);
//! ```

mod app;
mod convert;
mod error;
mod usage;

// Re-export core types
pub use app::{App, Command, Handler};
pub use convert::{ConvertError, Converter, converter_for};
pub use error::{DispatchError, Result};
pub use usage::{ArgSpec, UsageError, parse_usage};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
