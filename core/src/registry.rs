//! Per-definition declaration registry with inheritance.
//!
//! A child definition starts from a copy of its parent's registry and appends
//! its own declarations. Lookups scan newest-first, so a child switch shadows
//! an inherited one while both stay listed for help. The parent registry is
//! never touched.
//!
//! # Example
//!
//! ```
//! use clasp_core::*;
//!
//! let base = Definition::builder()
//!     .option(OptionDecl::flag(&["--verbose"], "be louder"))
//!     .build()
//!     .unwrap();
//!
//! let derived = Definition::extend(&base)
//!     .option(OptionDecl::valued(&["--iterations"], "N", "number of times to go around"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(derived.registry().options().len(), 2);
//! assert_eq!(base.registry().options().len(), 1);
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::types::{Declaration, OptionDecl, ParameterDecl, SubcommandDecl};

/// Ordered options, parameters and subcommands of one definition.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: Vec<Arc<OptionDecl>>,
    parameters: Vec<Arc<ParameterDecl>>,
    subcommands: Vec<Arc<SubcommandDecl>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the parent's entries, in order.
    pub fn inherit(parent: &Registry) -> Self {
        parent.clone()
    }

    /// Appends an option. Switches it shares with earlier options shadow them.
    pub fn declare_option(&mut self, option: OptionDecl) {
        for switch in option.recognised_switches() {
            if let Some(previous) = self.find_option(&switch) {
                warn!(
                    switch = %switch,
                    shadowed = %previous.name(),
                    "Option switch shadows an earlier declaration"
                );
            }
        }
        self.options.push(Arc::new(option));
    }

    /// Appends a parameter.
    pub fn declare_parameter(&mut self, parameter: ParameterDecl) {
        self.parameters.push(Arc::new(parameter));
    }

    /// Appends a subcommand.
    pub fn declare_subcommand(&mut self, subcommand: SubcommandDecl) {
        self.subcommands.push(Arc::new(subcommand));
    }

    /// Options in declaration order, inherited first.
    pub fn options(&self) -> &[Arc<OptionDecl>] {
        &self.options
    }

    /// Parameters in declaration order, inherited first.
    pub fn parameters(&self) -> &[Arc<ParameterDecl>] {
        &self.parameters
    }

    /// Subcommands in declaration order, inherited first.
    pub fn subcommands(&self) -> &[Arc<SubcommandDecl>] {
        &self.subcommands
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Finds the option triggered by `switch`; the last declared wins.
    pub fn find_option(&self, switch: &str) -> Option<&Arc<OptionDecl>> {
        self.options.iter().rev().find(|o| o.handles(switch))
    }

    /// Finds a subcommand by exact name or alias; the last declared wins.
    pub fn find_subcommand(&self, name: &str) -> Option<&Arc<SubcommandDecl>> {
        self.subcommands.iter().rev().find(|s| s.matches(name))
    }

    /// Finds the declaration bound to `attribute_name`, options first.
    pub fn find_attribute(&self, attribute_name: &str) -> Option<Declaration<'_>> {
        let option = self
            .options
            .iter()
            .rev()
            .find(|o| o.attribute_name() == attribute_name)
            .map(|o| Declaration::Option(o.as_ref()));
        option.or_else(|| {
            self.parameters
                .iter()
                .rev()
                .find(|p| p.attribute_name() == attribute_name)
                .map(|p| Declaration::Parameter(p.as_ref()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reader;

    fn base_registry() -> Registry {
        let mut registry = Registry::new();
        registry.declare_option(OptionDecl::flag(&["--verbose"], "be louder"));
        registry.declare_option(OptionDecl::valued(&["-c", "--color"], "COLOR", "Preferred hue"));
        registry
    }

    #[test]
    fn test_inherit_preserves_parent_order() {
        let parent = base_registry();
        let mut child = Registry::inherit(&parent);
        child.declare_option(OptionDecl::valued(
            &["--iterations"],
            "N",
            "number of times to go around",
        ));

        let names: Vec<&str> = child.options().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["--verbose", "--color", "--iterations"]);
        assert_eq!(parent.options().len(), 2);
    }

    #[test]
    fn test_child_switch_shadows_parent() {
        let parent = base_registry();
        let mut child = Registry::inherit(&parent);
        child.declare_option(
            OptionDecl::valued(&["--color"], "COLOUR", "Preferred colour")
                .with_attribute_name("colour"),
        );

        let found = child.find_option("--color").unwrap();
        assert_eq!(found.attribute_name(), "colour");
        assert_eq!(child.options().len(), 3);
        assert_eq!(
            parent.find_option("--color").unwrap().attribute_name(),
            "color"
        );
    }

    #[test]
    fn test_find_attribute_reports_reader() {
        let mut registry = base_registry();
        registry.declare_parameter(ParameterDecl::new("[ARG] ...", "extra arguments"));

        assert_eq!(
            registry.find_attribute("verbose").unwrap().reader(),
            Reader::Predicate
        );
        assert_eq!(
            registry.find_attribute("arg_list").unwrap().kind(),
            "parameter"
        );
        assert!(registry.find_attribute("flavour").is_none());
    }
}
