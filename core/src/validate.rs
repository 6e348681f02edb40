//! Declaration validation.
//!
//! Catches malformed declarations when a definition is built: bad switch
//! formats, parameter ordering mistakes, and definitions mixing parameters
//! with subcommands. These are programming errors, not usage errors, so they
//! are never translated into a [`UsageError`](crate::UsageError).
//!
//! # Examples
//!
//! ```
//! use clasp_core::*;
//!
//! let mut registry = Registry::new();
//! registry.declare_option(OptionDecl::flag(&["-v", "--verbose"], "Be heartier"));
//! assert!(validate_registry(&registry).is_empty());
//!
//! // `[A]` has no default, so nothing may follow it.
//! let mut bad = Registry::new();
//! bad.declare_parameter(ParameterDecl::new("[A]", "first"));
//! bad.declare_parameter(ParameterDecl::new("[B]", "second"));
//! assert!(!validate_registry(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::registry::Registry;
use crate::types::{OptionDecl, ParameterDecl, SubcommandDecl};

/// A definition that cannot be built.
///
/// Raised by [`DefinitionBuilder::build`](crate::DefinitionBuilder::build)
/// before any command line is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// An option has no switches at all.
    #[error("option must declare at least one switch")]
    MissingSwitch,
    /// Short switch is not a dash followed by exactly one character.
    #[error("invalid short switch format: {0}")]
    InvalidShortSwitch(String),
    /// Long switch does not start with `--` or is too short.
    #[error("invalid long switch format: {0}")]
    InvalidLongSwitch(String),
    /// `--[no-]x` declared on an option that takes a value.
    #[error("only flags can be negated: {0}")]
    NegatedValuedOption(String),
    /// A flag marked as accumulating.
    #[error("flags cannot be multivalued: {0}")]
    MultivaluedFlag(String),
    /// Valued option with a blank argument type.
    #[error("argument type cannot be empty for option: {0}")]
    EmptyArgumentType(String),
    /// Parameter name is empty or whitespace-only.
    #[error("parameter name cannot be empty")]
    EmptyParameterName,
    /// A required parameter declared after an optional or variadic one.
    #[error("required parameter '{required}' cannot follow '{preceding}'")]
    RequiredAfterOptional {
        /// The offending required parameter.
        required: String,
        /// The optional or variadic parameter before it.
        preceding: String,
    },
    /// A variadic parameter that is not the last parameter.
    #[error("variadic parameter '{0}' must be the last parameter")]
    VariadicNotLast(String),
    /// An optional parameter without a default followed by another
    /// parameter; only the last parameter may claim whatever remains.
    #[error("optional parameter '{parameter}' has no default and cannot be followed by '{following}'")]
    OpenParameterNotLast {
        /// The optional parameter without a default.
        parameter: String,
        /// The parameter declared after it.
        following: String,
    },
    /// Subcommand name or alias is empty or whitespace-only.
    #[error("subcommand name cannot be empty")]
    EmptySubcommandName,
    /// Two subcommands share a name or alias.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A definition declaring both parameters and subcommands.
    #[error("a command cannot declare both parameters and subcommands")]
    ParametersWithSubcommands,
}

/// Validates a registry.
///
/// Stops at the first problem found, like the parser stops at the first
/// usage error.
pub fn validate_registry(registry: &Registry) -> Vec<DeclarationError> {
    let mut errors = Vec::new();

    if registry.has_parameters() && registry.has_subcommands() {
        errors.push(DeclarationError::ParametersWithSubcommands);
        return errors;
    }

    for option in registry.options() {
        errors.extend(validate_option(option));
        if !errors.is_empty() {
            return errors;
        }
    }

    let parameters: Vec<&ParameterDecl> = registry.parameters().iter().map(|p| p.as_ref()).collect();
    errors.extend(validate_parameters(&parameters));
    if !errors.is_empty() {
        return errors;
    }

    let subcommands: Vec<&SubcommandDecl> =
        registry.subcommands().iter().map(|s| s.as_ref()).collect();
    errors.extend(validate_subcommands(&subcommands));

    errors
}

fn validate_option(option: &OptionDecl) -> Vec<DeclarationError> {
    let mut errors = Vec::new();

    if option.switches().is_empty() {
        errors.push(DeclarationError::MissingSwitch);
        return errors;
    }

    for switch in option.switches() {
        if let Some(rest) = switch.strip_prefix("--") {
            let name = rest.strip_prefix("[no-]").unwrap_or(rest);
            if name.is_empty() || name.starts_with('-') || name.contains('=') {
                errors.push(DeclarationError::InvalidLongSwitch(switch.clone()));
                return errors;
            }
            if rest.starts_with("[no-]") && !option.is_flag() {
                errors.push(DeclarationError::NegatedValuedOption(switch.clone()));
                return errors;
            }
        } else if !switch.starts_with('-') || switch.chars().count() != 2 {
            errors.push(DeclarationError::InvalidShortSwitch(switch.clone()));
            return errors;
        }
    }

    if option.is_flag() && option.is_multivalued() {
        errors.push(DeclarationError::MultivaluedFlag(option.name().to_string()));
        return errors;
    }

    if option.argument_type().is_some_and(|t| t.trim().is_empty()) {
        errors.push(DeclarationError::EmptyArgumentType(option.name().to_string()));
    }

    errors
}

fn validate_parameters(parameters: &[&ParameterDecl]) -> Vec<DeclarationError> {
    let mut errors = Vec::new();
    let mut preceding_optional: Option<&str> = None;
    let mut preceding_open: Option<&str> = None;

    for (i, parameter) in parameters.iter().enumerate() {
        if parameter.name().trim().is_empty() {
            errors.push(DeclarationError::EmptyParameterName);
            return errors;
        }

        if parameter.is_multivalued() && i + 1 != parameters.len() {
            errors.push(DeclarationError::VariadicNotLast(
                parameter.name().to_string(),
            ));
            return errors;
        }

        if parameter.is_required() {
            if let Some(preceding) = preceding_optional {
                errors.push(DeclarationError::RequiredAfterOptional {
                    required: parameter.name().to_string(),
                    preceding: preceding.to_string(),
                });
                return errors;
            }
        }

        if let Some(open) = preceding_open {
            errors.push(DeclarationError::OpenParameterNotLast {
                parameter: open.to_string(),
                following: parameter.name().to_string(),
            });
            return errors;
        }

        if !parameter.is_required() {
            preceding_optional = Some(parameter.name());
            if parameter.default_value().is_none() {
                preceding_open = Some(parameter.name());
            }
        }
    }

    errors
}

fn validate_subcommands(subcommands: &[&SubcommandDecl]) -> Vec<DeclarationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for sub in subcommands {
        let names = std::iter::once(sub.name()).chain(sub.aliases().iter().map(String::as_str));
        for name in names {
            let name = name.trim();
            if name.is_empty() {
                errors.push(DeclarationError::EmptySubcommandName);
                return errors;
            }
            if !seen.insert(name) {
                errors.push(DeclarationError::DuplicateSubcommand(name.to_string()));
                return errors;
            }
        }
    }

    errors
}
