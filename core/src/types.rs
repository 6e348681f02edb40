//! Declaration types: the options, parameters and subcommands a command
//! definition is built from.
//!
//! Declarations are immutable once built. Each one knows which tokens
//! trigger it and how to consume further tokens to produce a [`Value`].
//! Values stay raw strings until a converter coerces them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cursor::TokenCursor;
use crate::definition::Definition;
use crate::error::{ArgumentError, CursorError};

/// Converts a raw argument string into a value.
pub type Converter = Arc<dyn Fn(&str) -> Result<Value, ArgumentError> + Send + Sync>;

/// Attribute write accessor: validates or transforms a value before it is
/// stored.
pub type Writer = Arc<dyn Fn(Value) -> Result<Value, ArgumentError> + Send + Sync>;

/// A bound attribute value.
///
/// # Examples
///
/// ```
/// use clasp_core::Value;
///
/// assert_eq!(Value::from("mint").as_str(), Some("mint"));
/// assert_eq!(Value::from(2).as_integer(), Some(2));
/// assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a, b]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Flag state.
    Bool(bool),
    /// Whole number, usually produced by a converter.
    Integer(i64),
    /// Floating point number, usually produced by a converter.
    Float(f64),
    /// Raw or converted text.
    String(String),
    /// Accumulated values of a multivalued option or variadic parameter.
    List(Vec<Value>),
}

impl Value {
    /// Returns the string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a flag value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float, if this is a float value.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the items, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Which read accessor an attribute exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    /// Read through [`Command::read`](crate::Command::read).
    Plain,
    /// Flags: read through [`Command::flag`](crate::Command::flag).
    Predicate,
}

/// Derives an attribute name from a declared name.
///
/// `--[no-]nuts` → `nuts`, `--dry-run` → `dry_run`, `[Z]` → `z`,
/// `WORD ...` → `word_list`.
pub(crate) fn infer_attribute_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('-').replace("[no-]", "");
    let (base, list) = match name.strip_suffix("...") {
        Some(base) => (base.trim_end(), true),
        None => (name.as_str(), false),
    };
    let base = base.trim_start_matches('[').trim_end_matches(']');
    let mut attribute = base.to_lowercase().replace('-', "_");
    if list {
        attribute.push_str("_list");
    }
    attribute
}

/// Expands `--[no-]x` into `--x` and `--no-x`.
fn expand_switch(switch: &str) -> Vec<String> {
    match switch.strip_prefix("--[no-]") {
        Some(rest) => vec![format!("--{rest}"), format!("--no-{rest}")],
        None => vec![switch.to_string()],
    }
}

/// A switch-triggered declaration.
///
/// Use [`flag`](OptionDecl::flag) or [`valued`](OptionDecl::valued), then
/// chain builder methods.
///
/// # Examples
///
/// ```
/// use clasp_core::OptionDecl;
///
/// let nuts = OptionDecl::flag(&["-n", "--[no-]nuts"], "Nuts (or not)");
/// assert!(nuts.is_flag());
/// assert!(nuts.handles("--no-nuts"));
/// assert_eq!(nuts.attribute_name(), "nuts");
///
/// let flavour = OptionDecl::valued(&["-f", "--flavour"], "FLAVOUR", "Flavour of the month");
/// assert_eq!(flavour.name(), "--flavour");
/// assert_eq!(flavour.help_row().0, "-f, --flavour FLAVOUR");
/// ```
#[derive(Clone)]
pub struct OptionDecl {
    switches: Vec<String>,
    argument_type: Option<String>,
    description: String,
    default: Option<Value>,
    attribute_name: String,
    explicit_attribute_name: bool,
    multivalued: bool,
    converter: Option<Converter>,
    writer: Option<Writer>,
}

impl OptionDecl {
    /// Creates a boolean flag; it never consumes a value token.
    pub fn flag(switches: &[&str], description: &str) -> Self {
        Self::build(switches, None, description)
    }

    /// Creates an option taking one value, shown as `argument_type` in help.
    pub fn valued(switches: &[&str], argument_type: &str, description: &str) -> Self {
        Self::build(switches, Some(argument_type.to_string()), description)
    }

    fn build(switches: &[&str], argument_type: Option<String>, description: &str) -> Self {
        let mut option = Self {
            switches: switches.iter().map(|s| s.to_string()).collect(),
            argument_type,
            description: description.to_string(),
            default: None,
            attribute_name: String::new(),
            explicit_attribute_name: false,
            multivalued: false,
            converter: None,
            writer: None,
        };
        option.attribute_name = option.inferred_attribute_name();
        option
    }

    fn inferred_attribute_name(&self) -> String {
        let mut attribute = infer_attribute_name(self.name());
        if self.multivalued {
            attribute.push_str("_list");
        }
        attribute
    }

    /// Sets the value read back while the option is unset.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Binds to `attribute_name` instead of the derived name.
    pub fn with_attribute_name(mut self, attribute_name: &str) -> Self {
        self.attribute_name = attribute_name.to_string();
        self.explicit_attribute_name = true;
        self
    }

    /// Accumulates repeated occurrences into a list (`<name>_list`).
    pub fn allow_multiple(mut self) -> Self {
        self.multivalued = true;
        if !self.explicit_attribute_name {
            self.attribute_name = self.inferred_attribute_name();
        }
        self
    }

    /// Converts each raw value before it is bound.
    pub fn with_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ArgumentError> + Send + Sync + 'static,
    {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Replaces the default write accessor.
    pub fn with_writer<F>(mut self, writer: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ArgumentError> + Send + Sync + 'static,
    {
        self.writer = Some(Arc::new(writer));
        self
    }

    /// Switches as declared, including `--[no-]` forms.
    pub fn switches(&self) -> &[String] {
        &self.switches
    }

    /// Every token that triggers this option.
    pub fn recognised_switches(&self) -> Vec<String> {
        self.switches.iter().flat_map(|s| expand_switch(s)).collect()
    }

    /// Display name: the long switch, falling back to the first switch.
    pub fn name(&self) -> &str {
        self.long_switch()
            .or_else(|| self.switches.first().map(String::as_str))
            .unwrap_or("unknown")
    }

    /// The first declared `--long` switch.
    pub fn long_switch(&self) -> Option<&str> {
        self.switches
            .iter()
            .map(String::as_str)
            .find(|s| s.starts_with("--"))
    }

    /// Help placeholder for the value; `None` for flags.
    pub fn argument_type(&self) -> Option<&str> {
        self.argument_type.as_deref()
    }

    /// One-line help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Value read back while unset.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Target attribute.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Whether the attribute name was given explicitly.
    pub fn has_explicit_attribute_name(&self) -> bool {
        self.explicit_attribute_name
    }

    /// Returns `true` for boolean flags.
    pub fn is_flag(&self) -> bool {
        self.argument_type.is_none()
    }

    /// Returns `true` if repeated occurrences accumulate.
    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }

    /// Checks if `switch` triggers this option.
    pub fn handles(&self, switch: &str) -> bool {
        self.switches
            .iter()
            .any(|s| expand_switch(s).iter().any(|e| e == switch))
    }

    /// Checks if `switch` is the generated `--no-x` form.
    pub fn is_negation(&self, switch: &str) -> bool {
        self.switches.iter().any(|s| {
            s.strip_prefix("--[no-]")
                .is_some_and(|rest| switch.strip_prefix("--no-") == Some(rest))
        })
    }

    /// Produces the value for an occurrence of `switch`, consuming the value
    /// token from `cursor` for valued options.
    ///
    /// # Errors
    ///
    /// Returns `no value provided` if a value is needed and the cursor is
    /// empty, or whatever the converter rejects the value with.
    pub fn extract_value(
        &self,
        switch: &str,
        cursor: &mut TokenCursor,
    ) -> Result<Value, ArgumentError> {
        if self.is_flag() {
            return Ok(Value::Bool(!self.is_negation(switch)));
        }
        let raw = cursor.consume()?;
        self.convert(&raw)
    }

    /// Runs the converter, or wraps `raw` as a string value.
    pub fn convert(&self, raw: &str) -> Result<Value, ArgumentError> {
        match &self.converter {
            Some(converter) => converter(raw),
            None => Ok(Value::String(raw.to_string())),
        }
    }

    /// Runs the write accessor.
    pub fn write(&self, value: Value) -> Result<Value, ArgumentError> {
        match &self.writer {
            Some(writer) => writer(value),
            None => Ok(value),
        }
    }

    /// Left and right help columns.
    pub fn help_row(&self) -> (String, String) {
        let mut left = self.switches.join(", ");
        if let Some(argument_type) = &self.argument_type {
            left.push(' ');
            left.push_str(argument_type);
        }
        let right = match &self.default {
            Some(default) => format!("{} (default: {default})", self.description),
            None => self.description.clone(),
        };
        (left, right)
    }
}

impl fmt::Debug for OptionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDecl")
            .field("switches", &self.switches)
            .field("argument_type", &self.argument_type)
            .field("attribute_name", &self.attribute_name)
            .field("default", &self.default)
            .field("multivalued", &self.multivalued)
            .field("converter", &self.converter.is_some())
            .field("writer", &self.writer.is_some())
            .finish()
    }
}

/// A positional declaration.
///
/// The name encodes its shape: `NAME` is required, `[NAME]` optional,
/// `NAME ...` takes every remaining token (at least one) and `[NAME] ...`
/// takes every remaining token (possibly none).
///
/// # Examples
///
/// ```
/// use clasp_core::ParameterDecl;
///
/// let z = ParameterDecl::new("[Z]", "z");
/// assert!(!z.is_required());
/// assert_eq!(z.attribute_name(), "z");
///
/// let words = ParameterDecl::new("WORD ...", "words");
/// assert!(words.is_required());
/// assert!(words.is_multivalued());
/// assert_eq!(words.attribute_name(), "word_list");
/// ```
#[derive(Clone)]
pub struct ParameterDecl {
    name: String,
    description: String,
    attribute_name: String,
    required: bool,
    multivalued: bool,
    default: Option<Value>,
    converter: Option<Converter>,
    writer: Option<Writer>,
}

impl ParameterDecl {
    /// Creates a parameter from its display name.
    pub fn new(name: &str, description: &str) -> Self {
        let trimmed = name.trim();
        let (base, multivalued) = match trimmed.strip_suffix("...") {
            Some(base) => (base.trim_end(), true),
            None => (trimmed, false),
        };
        Self {
            name: name.to_string(),
            description: description.to_string(),
            attribute_name: infer_attribute_name(name),
            required: !base.starts_with('['),
            multivalued,
            default: None,
            converter: None,
            writer: None,
        }
    }

    /// Binds to `attribute_name` instead of the derived name.
    pub fn with_attribute_name(mut self, attribute_name: &str) -> Self {
        self.attribute_name = attribute_name.to_string();
        self
    }

    /// Sets the value read back while the parameter is unset.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Converts each raw token before it is bound.
    pub fn with_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&str) -> Result<Value, ArgumentError> + Send + Sync + 'static,
    {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Replaces the default write accessor.
    pub fn with_writer<F>(mut self, writer: F) -> Self
    where
        F: Fn(Value) -> Result<Value, ArgumentError> + Send + Sync + 'static,
    {
        self.writer = Some(Arc::new(writer));
        self
    }

    /// Display name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Target attribute.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    /// Value read back while unset.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns `false` for bracketed parameters.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns `true` for `...` parameters.
    pub fn is_multivalued(&self) -> bool {
        self.multivalued
    }

    /// Consumes this parameter's share of `cursor`.
    ///
    /// Returns `Ok(None)` when an optional scalar parameter finds nothing to
    /// consume.
    ///
    /// # Errors
    ///
    /// Returns `no value provided` when a required parameter finds the cursor
    /// empty, or whatever the converter rejects a token with.
    pub fn consume(&self, cursor: &mut TokenCursor) -> Result<Option<Value>, ArgumentError> {
        if self.required && cursor.is_empty() {
            return Err(CursorError::NoValue.into());
        }
        if self.multivalued {
            let values = cursor
                .take_all()
                .iter()
                .map(|raw| self.convert(raw))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(Value::List(values)));
        }
        match cursor.consume() {
            Ok(raw) => self.convert(&raw).map(Some),
            Err(CursorError::NoValue) => Ok(None),
        }
    }

    /// Runs the converter, or wraps `raw` as a string value.
    pub fn convert(&self, raw: &str) -> Result<Value, ArgumentError> {
        match &self.converter {
            Some(converter) => converter(raw),
            None => Ok(Value::String(raw.to_string())),
        }
    }

    /// Runs the write accessor.
    pub fn write(&self, value: Value) -> Result<Value, ArgumentError> {
        match &self.writer {
            Some(writer) => writer(value),
            None => Ok(value),
        }
    }

    /// Left and right help columns.
    pub fn help_row(&self) -> (String, String) {
        (self.name.clone(), self.description.clone())
    }
}

impl fmt::Debug for ParameterDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDecl")
            .field("name", &self.name)
            .field("attribute_name", &self.attribute_name)
            .field("required", &self.required)
            .field("multivalued", &self.multivalued)
            .field("default", &self.default)
            .finish()
    }
}

/// Where a subcommand's definition comes from.
#[derive(Clone)]
pub enum SubcommandTarget {
    /// An already built definition.
    Definition(Arc<Definition>),
    /// Builds the definition when the subcommand is dispatched.
    Factory(Arc<dyn Fn() -> Arc<Definition> + Send + Sync>),
}

/// A named nested command.
///
/// # Examples
///
/// ```
/// use clasp_core::{Definition, SubcommandDecl};
///
/// let add = Definition::builder().build().unwrap();
/// let sub = SubcommandDecl::new("add", "Add a remote", add).with_alias("a");
/// assert!(sub.matches("add"));
/// assert!(sub.matches("a"));
/// assert!(!sub.matches("Add"));
/// ```
#[derive(Clone)]
pub struct SubcommandDecl {
    name: String,
    aliases: Vec<String>,
    description: String,
    target: SubcommandTarget,
}

impl SubcommandDecl {
    /// Creates a subcommand dispatching to `definition`.
    pub fn new(name: &str, description: &str, definition: Arc<Definition>) -> Self {
        Self::with_target(name, description, SubcommandTarget::Definition(definition))
    }

    /// Creates a subcommand whose definition is built by `factory` on
    /// dispatch.
    pub fn with_factory<F>(name: &str, description: &str, factory: F) -> Self
    where
        F: Fn() -> Arc<Definition> + Send + Sync + 'static,
    {
        Self::with_target(name, description, SubcommandTarget::Factory(Arc::new(factory)))
    }

    fn with_target(name: &str, description: &str, target: SubcommandTarget) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            description: description.to_string(),
            target,
        }
    }

    /// Adds an alternative name.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative names.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// One-line help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Exact, case-sensitive match against the name and aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    /// Resolves the definition to dispatch to.
    pub fn definition(&self) -> Arc<Definition> {
        match &self.target {
            SubcommandTarget::Definition(definition) => Arc::clone(definition),
            SubcommandTarget::Factory(factory) => factory(),
        }
    }

    /// Left and right help columns.
    pub fn help_row(&self) -> (String, String) {
        let names: Vec<&str> = std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .collect();
        (names.join(", "), self.description.clone())
    }
}

impl fmt::Debug for SubcommandDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubcommandDecl")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// A bindable declaration: the unit the binder writes through.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    /// A switch-triggered option.
    Option(&'a OptionDecl),
    /// A positional parameter.
    Parameter(&'a ParameterDecl),
}

impl<'a> Declaration<'a> {
    /// `"option"` or `"parameter"`, as used in usage error prefixes.
    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Option(_) => "option",
            Declaration::Parameter(_) => "parameter",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'a str {
        match *self {
            Declaration::Option(option) => option.name(),
            Declaration::Parameter(parameter) => parameter.name(),
        }
    }

    /// Target attribute.
    pub fn attribute_name(&self) -> &'a str {
        match *self {
            Declaration::Option(option) => option.attribute_name(),
            Declaration::Parameter(parameter) => parameter.attribute_name(),
        }
    }

    /// Value read back while unset.
    pub fn default_value(&self) -> Option<&'a Value> {
        match *self {
            Declaration::Option(option) => option.default_value(),
            Declaration::Parameter(parameter) => parameter.default_value(),
        }
    }

    /// Read accessor exposed for the attribute.
    pub fn reader(&self) -> Reader {
        match self {
            Declaration::Option(option) if option.is_flag() => Reader::Predicate,
            _ => Reader::Plain,
        }
    }

    /// Whether writes append to a list instead of replacing.
    pub fn accumulates(&self) -> bool {
        matches!(self, Declaration::Option(option) if option.is_multivalued())
    }

    /// Runs the converter.
    pub fn convert(&self, raw: &str) -> Result<Value, ArgumentError> {
        match self {
            Declaration::Option(option) => option.convert(raw),
            Declaration::Parameter(parameter) => parameter.convert(raw),
        }
    }

    /// Runs the write accessor.
    pub fn write(&self, value: Value) -> Result<Value, ArgumentError> {
        match self {
            Declaration::Option(option) => option.write(value),
            Declaration::Parameter(parameter) => parameter.write(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_attribute_name() {
        assert_eq!(infer_attribute_name("--flavour"), "flavour");
        assert_eq!(infer_attribute_name("--[no-]nuts"), "nuts");
        assert_eq!(infer_attribute_name("--dry-run"), "dry_run");
        assert_eq!(infer_attribute_name("-n"), "n");
        assert_eq!(infer_attribute_name("[Z]"), "z");
        assert_eq!(infer_attribute_name("WORD ..."), "word_list");
        assert_eq!(infer_attribute_name("[ARG] ..."), "arg_list");
    }

    #[test]
    fn test_flag_negation() {
        let nuts = OptionDecl::flag(&["-n", "--[no-]nuts"], "Nuts (or not)");
        let mut cursor = TokenCursor::new(["left", "alone"]);

        assert_eq!(
            nuts.extract_value("--nuts", &mut cursor),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            nuts.extract_value("--no-nuts", &mut cursor),
            Ok(Value::Bool(false))
        );
        assert_eq!(nuts.extract_value("-n", &mut cursor), Ok(Value::Bool(true)));
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn test_literal_no_switch_is_not_negation() {
        let plain = OptionDecl::flag(&["--no-cache"], "Skip the cache");
        assert!(plain.handles("--no-cache"));
        assert!(!plain.is_negation("--no-cache"));
        assert_eq!(plain.attribute_name(), "no_cache");
    }

    #[test]
    fn test_valued_option_takes_next_token_verbatim() {
        let flavour = OptionDecl::valued(&["--flavour"], "FLAVOUR", "Flavour of the month");
        let mut cursor = TokenCursor::new(["--color"]);
        assert_eq!(
            flavour.extract_value("--flavour", &mut cursor),
            Ok(Value::from("--color"))
        );

        let error = flavour.extract_value("--flavour", &mut cursor).unwrap_err();
        assert_eq!(error.message(), "no value provided");
    }

    #[test]
    fn test_multivalued_option_attribute_name() {
        let include = OptionDecl::valued(&["-I", "--include"], "DIR", "search path").allow_multiple();
        assert_eq!(include.attribute_name(), "include_list");

        let explicit = OptionDecl::valued(&["--include"], "DIR", "search path")
            .with_attribute_name("dirs")
            .allow_multiple();
        assert_eq!(explicit.attribute_name(), "dirs");
    }

    #[test]
    fn test_option_help_row_with_default() {
        let nodes = OptionDecl::valued(&["--nodes"], "N", "number of nodes").with_default(2);
        assert_eq!(
            nodes.help_row(),
            (
                "--nodes N".to_string(),
                "number of nodes (default: 2)".to_string()
            )
        );
    }

    #[test]
    fn test_optional_parameter_leaves_value_unset() {
        let z = ParameterDecl::new("[Z]", "z");
        let mut cursor = TokenCursor::default();
        assert_eq!(z.consume(&mut cursor), Ok(None));
    }

    #[test]
    fn test_variadic_parameter_converts_each_token() {
        let ports = ParameterDecl::new("PORT ...", "ports").with_converter(|raw| {
            raw.parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| ArgumentError::new(e.to_string()))
        });
        let mut cursor = TokenCursor::new(["80", "443"]);
        assert_eq!(
            ports.consume(&mut cursor),
            Ok(Some(Value::List(vec![Value::Integer(80), Value::Integer(443)])))
        );
        assert!(cursor.is_empty());

        let mut empty = TokenCursor::default();
        assert!(ports.consume(&mut empty).is_err());
    }

    #[test]
    fn test_optional_variadic_accepts_nothing() {
        let args = ParameterDecl::new("[ARG] ...", "extra arguments");
        let mut cursor = TokenCursor::default();
        assert_eq!(args.consume(&mut cursor), Ok(Some(Value::List(vec![]))));
    }

    #[test]
    fn test_declaration_reader_kinds() {
        let verbose = OptionDecl::flag(&["--verbose"], "Be heartier");
        let port = OptionDecl::valued(&["--port"], "PORT", "Port to listen on");
        assert_eq!(Declaration::Option(&verbose).reader(), Reader::Predicate);
        assert_eq!(Declaration::Option(&port).reader(), Reader::Plain);
    }
}
