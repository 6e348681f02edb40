//! Declarative command-line parsing.
//!
//! Application authors declare options, positional parameters and
//! subcommands on a [`Definition`]; a [`Command`] instance parses raw
//! arguments against it, binding values to named attributes, and help text is
//! generated from the same declarations.
//!
//! - [`OptionDecl`]: a switch-triggered option, either a flag (`--[no-]nuts`) or
//!   an option taking a value (`--flavour FLAVOUR`).
//! - [`ParameterDecl`]: a positional parameter such as `NAME` or `[NAME]`
//!   or `NAME ...`.
//! - [`SubcommandDecl`]: a nested command taking over the remaining
//!   arguments.
//! - [`Registry`]: the ordered, inheritance-merged declarations of a
//!   definition.
//!
//! Parsing failures caused by user input are [`UsageError`]s. Converters and
//! attribute writers reject values with [`ArgumentError`], which the parser
//! reports as a usage error naming the option or parameter. Malformed
//! declarations are [`DeclarationError`]s returned when a definition is
//! built.
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//!
//! use clasp_core::*;
//!
//! let definition = Definition::builder()
//!     .option(OptionDecl::flag(&["--loud"], "say it loud"))
//!     .option(
//!         OptionDecl::valued(&["-n", "--iterations"], "N", "say it N times")
//!             .with_default(1)
//!             .with_converter(convert::integer),
//!     )
//!     .parameter(ParameterDecl::new("WORDS ...", "the thing to say"))
//!     .execute(|command, out| {
//!         let words: Vec<String> = command
//!             .read_list("words_list")
//!             .unwrap_or_default()
//!             .iter()
//!             .map(ToString::to_string)
//!             .collect();
//!         let mut message = words.join(" ");
//!         if command.flag("loud") {
//!             message = message.to_uppercase();
//!         }
//!         let times = command.read("iterations").and_then(Value::as_integer).unwrap_or(1);
//!         for _ in 0..times {
//!             writeln!(out, "{message}")?;
//!         }
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! Command::new(definition, "speak")
//!     .run(["--loud", "-n", "2", "hello", "world"], &mut out)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "HELLO WORLD\nHELLO WORLD\n");
//! ```

mod binder;
mod command;
pub mod convert;
mod cursor;
mod definition;
mod driver;
mod error;
pub mod help;
mod parser;
mod registry;
mod schema;
mod settings;
mod types;
mod validate;

pub use command::{Command, Context};
pub use cursor::{TERMINATOR, TokenCursor, TokenKind};
pub use definition::{Definition, DefinitionBuilder, ExecuteFn};
pub use driver::{run, run_from_env, run_with};
pub use error::{ArgumentError, CommandError, CursorError, Result, UsageError};
pub use registry::Registry;
pub use schema::{
    DefinitionSchema, MAX_SCHEMA_DEPTH, OptionSchema, ParameterSchema, SCHEMA_CONTRACT_VERSION,
    SubcommandSchema,
};
pub use settings::{Settings, SettingsError};
pub use types::*;
pub use validate::{DeclarationError, validate_registry};
