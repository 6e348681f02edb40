//! Command instances: one per invocation level.
//!
//! A [`Command`] owns the attribute values bound while parsing. Attributes
//! are slots keyed by attribute name; the registry decides which accessors
//! exist for a slot:
//!
//! - valued options and parameters are read with [`Command::read`],
//! - flags are read with the predicate [`Command::flag`],
//! - every declared attribute is written with [`Command::write`] (or
//!   [`Command::set_flag`] for flags).
//!
//! # Example
//!
//! ```
//! use clasp_core::*;
//!
//! let definition = Definition::builder()
//!     .option(OptionDecl::valued(&["-f", "--flavour"], "FLAVOUR", "Flavour of the month"))
//!     .option(OptionDecl::flag(&["-n", "--[no-]nuts"], "Nuts (or not)"))
//!     .build()
//!     .unwrap();
//!
//! let mut command = Command::new(definition, "cmd");
//! command.parse(["-nf", "strawberry"]).unwrap();
//! assert_eq!(command.read_str("flavour"), Some("strawberry"));
//! assert!(command.flag("nuts"));
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::binder::{self, Attributes};
use crate::cursor::TokenCursor;
use crate::definition::Definition;
use crate::error::{ArgumentError, CommandError, Result};
use crate::help;
use crate::parser;
use crate::settings::Settings;
use crate::types::{Declaration, Reader, SubcommandDecl, Value};

/// Caller-supplied values available to every command level during
/// execution.
pub type Context = BTreeMap<String, Value>;

/// A subcommand resolved by parsing, dispatched by [`Command::run`].
#[derive(Debug, Clone)]
pub(crate) struct PendingSubcommand {
    pub(crate) declaration: Arc<SubcommandDecl>,
    pub(crate) name: String,
    pub(crate) arguments: Vec<String>,
}

/// One invocation of a [`Definition`].
#[derive(Debug)]
pub struct Command {
    definition: Arc<Definition>,
    invocation_path: String,
    context: Arc<Context>,
    settings: Arc<Settings>,
    parent: Option<Weak<Command>>,
    pub(crate) attributes: Attributes,
    pub(crate) remaining_arguments: TokenCursor,
    pub(crate) pending_subcommand: Option<PendingSubcommand>,
}

impl Command {
    /// Creates an instance with an empty context and default settings.
    pub fn new(definition: Arc<Definition>, invocation_path: &str) -> Self {
        Self {
            definition,
            invocation_path: invocation_path.to_string(),
            context: Arc::new(Context::new()),
            settings: Arc::new(Settings::default()),
            parent: None,
            attributes: Attributes::new(),
            remaining_arguments: TokenCursor::default(),
            pending_subcommand: None,
        }
    }

    /// Replaces the context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Arc::new(context);
        self
    }

    /// Replaces the settings.
    pub fn with_settings(mut self, settings: Arc<Settings>) -> Self {
        self.settings = settings;
        self
    }

    pub fn definition(&self) -> &Arc<Definition> {
        &self.definition
    }

    /// Path used in help and error messages, e.g. `git remote add`.
    pub fn invocation_path(&self) -> &str {
        &self.invocation_path
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The command this one was dispatched from, while it is running.
    pub fn parent(&self) -> Option<Arc<Command>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Arguments not yet consumed by parsing.
    pub fn remaining_arguments(&self) -> &TokenCursor {
        &self.remaining_arguments
    }

    /// Read accessor exposed for `attribute`, if it is declared.
    pub fn reader(&self, attribute: &str) -> Option<Reader> {
        self.declaration(attribute).map(|d| d.reader())
    }

    /// Returns `true` if `attribute` is declared and can be written.
    pub fn has_writer(&self, attribute: &str) -> bool {
        self.declaration(attribute).is_some()
    }

    fn declaration(&self, attribute: &str) -> Option<Declaration<'_>> {
        self.definition.registry().find_attribute(attribute)
    }

    /// Plain reader: the bound value, else the declared default.
    ///
    /// Returns `None` for flags (use [`flag`](Self::flag)) and undeclared
    /// attributes.
    pub fn read(&self, attribute: &str) -> Option<&Value> {
        let declaration = self.declaration(attribute)?;
        if declaration.reader() != Reader::Plain {
            return None;
        }
        self.attributes
            .get(attribute)
            .or_else(|| declaration.default_value())
    }

    /// Plain reader for string values.
    pub fn read_str(&self, attribute: &str) -> Option<&str> {
        self.read(attribute).and_then(Value::as_str)
    }

    /// Plain reader for list values.
    pub fn read_list(&self, attribute: &str) -> Option<&[Value]> {
        self.read(attribute).and_then(Value::as_list)
    }

    /// Predicate reader for flags: the bound state, else the declared
    /// default, else `false`.
    pub fn flag(&self, attribute: &str) -> bool {
        let Some(declaration) = self.declaration(attribute) else {
            return false;
        };
        if declaration.reader() != Reader::Predicate {
            return false;
        }
        self.attributes
            .get(attribute)
            .or_else(|| declaration.default_value())
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Write accessor: converts `raw` and stores it through the attribute's
    /// writer.
    ///
    /// # Errors
    ///
    /// Returns the converter's or writer's [`ArgumentError`] unchanged, or
    /// an error naming the attribute if it is not declared.
    pub fn write(&mut self, attribute: &str, raw: &str) -> Result<(), ArgumentError> {
        let definition = Arc::clone(&self.definition);
        let declaration = definition
            .registry()
            .find_attribute(attribute)
            .ok_or_else(|| ArgumentError::new(format!("no such attribute '{attribute}'")))?;
        let value = declaration.convert(raw)?;
        binder::store(&mut self.attributes, declaration, value)
    }

    /// Write accessor for flags.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if `attribute` is not a declared flag,
    /// or whatever its writer rejects.
    pub fn set_flag(&mut self, attribute: &str, value: bool) -> Result<(), ArgumentError> {
        let definition = Arc::clone(&self.definition);
        let declaration = definition
            .registry()
            .find_attribute(attribute)
            .filter(|d| d.reader() == Reader::Predicate)
            .ok_or_else(|| ArgumentError::new(format!("no such flag '{attribute}'")))?;
        binder::store(&mut self.attributes, declaration, Value::Bool(value))
    }

    /// Parses `arguments`, binding attributes on the way.
    ///
    /// Attributes bound before a failure keep their new values.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Usage`] on the first usage error, or
    /// [`CommandError::HelpWanted`] when an undeclared help switch is seen.
    pub fn parse<I, S>(&mut self, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remaining_arguments = TokenCursor::new(arguments);
        self.pending_subcommand = None;
        debug!(
            command = %self.invocation_path,
            arguments = ?self.remaining_arguments,
            "Parsing arguments"
        );

        parser::parse_options(self)?;
        if self.definition.registry().has_subcommands() {
            parser::parse_subcommand(self)
        } else {
            parser::parse_parameters(self)
        }
    }

    /// Parses `arguments`, then executes the command or dispatches to the
    /// selected subcommand.
    ///
    /// Usage errors leaving this method carry the invocation path of the
    /// command level that raised them.
    ///
    /// # Errors
    ///
    /// Returns parse errors, and whatever the execution behaviour returns.
    pub fn run<I, S>(mut self, arguments: I, out: &mut dyn Write) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation_path = self.invocation_path.clone();
        let result = self.parse(arguments).and_then(|()| {
            let pending = self.pending_subcommand.take();
            let this = Arc::new(self);
            match pending {
                Some(pending) => Command::execute_subcommand(this, pending, out),
                None => this.execute(out),
            }
        });
        result.map_err(|error| error.located(&invocation_path))
    }

    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match self.definition.execute() {
            Some(execute) => execute(self, out),
            None => Err(CommandError::execution(format!(
                "no execution behaviour declared for '{}'",
                self.invocation_path
            ))),
        }
    }

    fn execute_subcommand(
        this: Arc<Command>,
        pending: PendingSubcommand,
        out: &mut dyn Write,
    ) -> Result<()> {
        let invocation_path = format!("{} {}", this.invocation_path, pending.name);
        debug!(command = %invocation_path, "Dispatching subcommand");

        let mut subcommand = Command::new(pending.declaration.definition(), &invocation_path);
        subcommand.context = Arc::clone(&this.context);
        subcommand.settings = Arc::clone(&this.settings);
        subcommand.parent = Some(Arc::downgrade(&this));
        subcommand.run(pending.arguments, out)
    }

    /// Help text for this command level.
    pub fn help(&self) -> String {
        help::render(
            &self.definition,
            &self.invocation_path,
            self.settings.left_column_width,
        )
    }
}
