//! Command definitions and their builder.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::command::Command;
use crate::error::CommandError;
use crate::registry::Registry;
use crate::schema::DefinitionSchema;
use crate::types::{OptionDecl, ParameterDecl, SubcommandDecl};
use crate::validate::{DeclarationError, validate_registry};

/// Execution behaviour of a command, run once its attributes are bound.
pub type ExecuteFn =
    Arc<dyn Fn(&Command, &mut dyn Write) -> Result<(), CommandError> + Send + Sync>;

/// An immutable command definition: declarations, usage lines, description
/// and execution behaviour.
///
/// Built once through [`DefinitionBuilder`] and shared behind an [`Arc`];
/// any number of [`Command`] instances can parse against it concurrently.
///
/// # Examples
///
/// ```
/// use clasp_core::*;
///
/// let definition = Definition::builder()
///     .option(OptionDecl::valued(&["-f", "--flavour"], "FLAVOUR", "Flavour of the month"))
///     .parameter(ParameterDecl::new("[ARG] ...", "extra arguments").with_attribute_name("arguments"))
///     .build()
///     .unwrap();
///
/// assert_eq!(definition.derived_usage_description(), "[OPTIONS] [ARG] ...");
/// ```
#[derive(Default)]
pub struct Definition {
    registry: Registry,
    usages: Vec<String>,
    description: Option<String>,
    execute: Option<ExecuteFn>,
}

impl Definition {
    /// Starts an empty definition.
    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    /// Starts a definition inheriting `parent`'s declarations and execution
    /// behaviour. Usage lines and description are not inherited.
    pub fn extend(parent: &Definition) -> DefinitionBuilder {
        DefinitionBuilder {
            registry: Registry::inherit(&parent.registry),
            usages: Vec::new(),
            description: None,
            execute: parent.execute.clone(),
        }
    }

    /// The resolved, inheritance-merged declarations.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Explicitly declared usage lines.
    pub fn declared_usage_descriptions(&self) -> &[String] {
        &self.usages
    }

    /// Usage derived from the declarations.
    pub fn derived_usage_description(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.registry.has_options() {
            parts.push("[OPTIONS]");
        }
        if self.registry.has_subcommands() {
            parts.push("SUBCOMMAND [ARGS] ...");
        }
        parts.extend(self.registry.parameters().iter().map(|p| p.name()));
        parts.join(" ")
    }

    /// Declared usage lines, or the derived one when none were declared.
    pub fn usage_descriptions(&self) -> Vec<String> {
        if self.usages.is_empty() {
            vec![self.derived_usage_description()]
        } else {
            self.usages.clone()
        }
    }

    /// Normalized description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn execute(&self) -> Option<&ExecuteFn> {
        self.execute.as_ref()
    }

    /// Serializable snapshot of this definition and its subcommands.
    pub fn schema(&self) -> DefinitionSchema {
        DefinitionSchema::from_definition(self)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("registry", &self.registry)
            .field("usages", &self.usages)
            .field("description", &self.description)
            .field("execute", &self.execute.is_some())
            .finish()
    }
}

/// Collects declarations for a [`Definition`].
#[derive(Default)]
pub struct DefinitionBuilder {
    registry: Registry,
    usages: Vec<String>,
    description: Option<String>,
    execute: Option<ExecuteFn>,
}

impl DefinitionBuilder {
    /// Declares an option.
    pub fn option(mut self, option: OptionDecl) -> Self {
        self.registry.declare_option(option);
        self
    }

    /// Declares a positional parameter.
    pub fn parameter(mut self, parameter: ParameterDecl) -> Self {
        self.registry.declare_parameter(parameter);
        self
    }

    /// Declares a subcommand.
    pub fn subcommand(mut self, subcommand: SubcommandDecl) -> Self {
        self.registry.declare_subcommand(subcommand);
        self
    }

    /// Adds a usage line, replacing the derived one in help.
    pub fn usage(mut self, usage: &str) -> Self {
        self.usages.push(usage.to_string());
        self
    }

    /// Sets the description; leading indentation common to the text is
    /// removed.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(normalize_description(description));
        self
    }

    /// Sets the execution behaviour.
    pub fn execute<F>(mut self, execute: F) -> Self
    where
        F: Fn(&Command, &mut dyn Write) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.execute = Some(Arc::new(execute));
        self
    }

    /// Validates the declarations and freezes the definition.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeclarationError`] found.
    pub fn build(self) -> Result<Arc<Definition>, DeclarationError> {
        if let Some(error) = validate_registry(&self.registry).into_iter().next() {
            return Err(error);
        }
        Ok(Arc::new(Definition {
            registry: self.registry,
            usages: self.usages,
            description: self.description,
            execute: self.execute,
        }))
    }
}

/// Strips the indentation of the first indented line from every line, then
/// trims the whole text.
fn normalize_description(description: &str) -> String {
    let first = description.trim_start_matches('\n');
    let indent_len = first.len() - first.trim_start_matches(' ').len();
    let indent = &first[..indent_len];
    let text = if indent.is_empty() {
        description.to_string()
    } else {
        description
            .lines()
            .map(|line| line.strip_prefix(indent).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n")
    };
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_description_flushes_left() {
        let description = "
        Punt is an example command.  It doesn't do much, really.

        The prefix at the beginning of this description should be normalised
        to flush left.
      ";
        let normalized = normalize_description(description);
        assert!(normalized.starts_with("Punt is an example command."));
        assert!(normalized.contains("\nThe prefix at the beginning"));
        assert!(normalized.ends_with("to flush left."));
    }

    #[test]
    fn test_derived_usage_for_subcommands() {
        let leaf = Definition::builder().build().unwrap();
        let definition = Definition::builder()
            .option(OptionDecl::flag(&["--verbose"], "be louder"))
            .subcommand(SubcommandDecl::new("flip", "flip it", leaf))
            .build()
            .unwrap();
        assert_eq!(
            definition.derived_usage_description(),
            "[OPTIONS] SUBCOMMAND [ARGS] ..."
        );
    }

    #[test]
    fn test_declared_usages_replace_derived() {
        let definition = Definition::builder()
            .usage("THIS HERE")
            .usage("THAT THERE")
            .build()
            .unwrap();
        assert_eq!(definition.usage_descriptions(), vec!["THIS HERE", "THAT THERE"]);
    }

    #[test]
    fn test_extend_does_not_touch_parent() {
        let parent = Definition::builder()
            .option(OptionDecl::flag(&["--verbose"], "be louder"))
            .usage("PARENT")
            .build()
            .unwrap();
        let child = Definition::extend(&parent)
            .option(OptionDecl::valued(&["--iterations"], "N", "number of times to go around"))
            .build()
            .unwrap();

        assert_eq!(parent.registry().options().len(), 1);
        assert_eq!(child.registry().options().len(), 2);
        assert!(child.declared_usage_descriptions().is_empty());
    }

    #[test]
    fn test_build_reports_first_declaration_error() {
        let error = Definition::builder()
            .parameter(ParameterDecl::new("[X]", "x"))
            .parameter(ParameterDecl::new("Y", "y"))
            .build()
            .unwrap_err();
        assert!(matches!(error, DeclarationError::RequiredAfterOptional { .. }));
    }
}
