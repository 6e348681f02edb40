//! Serializable snapshots of command definitions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::definition::Definition;
use crate::types::Value;

/// Version of the exported schema format (semver).
pub const SCHEMA_CONTRACT_VERSION: &str = "1.0.0";

/// Subcommand nesting depth beyond which snapshots stop descending.
///
/// Subcommand factories may build definitions that contain themselves; such
/// trees are cut off here with an empty subcommand list.
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Serializable snapshot of a [`Definition`] and its subcommands.
///
/// Converters, writers and execution behaviour are not part of the
/// snapshot; everything help needs is.
///
/// # Examples
///
/// ```
/// use clasp_core::*;
///
/// let definition = Definition::builder()
///     .option(OptionDecl::valued(&["--nodes"], "N", "number of nodes").with_default(2))
///     .parameter(ParameterDecl::new("[Z]", "z"))
///     .build()
///     .unwrap();
///
/// let schema = definition.schema();
/// assert_eq!(schema.options[0].attribute_name, "nodes");
/// assert_eq!(schema.options[0].default, Some(Value::Integer(2)));
/// assert!(!schema.parameters[0].required);
///
/// let json = schema.to_json().unwrap();
/// assert_eq!(DefinitionSchema::from_json(&json).unwrap(), schema);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionSchema {
    /// Schema contract version (populated from [`SCHEMA_CONTRACT_VERSION`]).
    pub schema_version: String,
    /// Usage lines, declared or derived.
    pub usage: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<OptionSchema>,
    pub parameters: Vec<ParameterSchema>,
    pub subcommands: Vec<SubcommandSchema>,
}

/// Exported option declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSchema {
    /// Switches as declared, including `--[no-]` forms.
    pub switches: Vec<String>,
    /// Value placeholder; absent for flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument_type: Option<String>,
    pub description: String,
    pub attribute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub flag: bool,
    pub multivalued: bool,
}

/// Exported parameter declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSchema {
    pub name: String,
    pub description: String,
    pub attribute_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub required: bool,
    pub multivalued: bool,
}

/// Exported subcommand declaration, with its definition inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcommandSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub description: String,
    pub definition: DefinitionSchema,
}

impl DefinitionSchema {
    /// Snapshots `definition`, resolving subcommand factories.
    ///
    /// Subcommands nested deeper than [`MAX_SCHEMA_DEPTH`] are omitted.
    pub fn from_definition(definition: &Definition) -> Self {
        Self::from_definition_at(definition, 0)
    }

    fn from_definition_at(definition: &Definition, depth: usize) -> Self {
        let registry = definition.registry();
        let subcommands = if depth < MAX_SCHEMA_DEPTH {
            registry
                .subcommands()
                .iter()
                .map(|s| SubcommandSchema {
                    name: s.name().to_string(),
                    aliases: s.aliases().to_vec(),
                    description: s.description().to_string(),
                    definition: Self::from_definition_at(&s.definition(), depth + 1),
                })
                .collect()
        } else {
            if registry.has_subcommands() {
                warn!(depth, "Subcommand nesting too deep, schema truncated");
            }
            Vec::new()
        };
        Self {
            schema_version: SCHEMA_CONTRACT_VERSION.to_string(),
            usage: definition.usage_descriptions(),
            description: definition.description().map(String::from),
            options: registry
                .options()
                .iter()
                .map(|o| OptionSchema {
                    switches: o.switches().to_vec(),
                    argument_type: o.argument_type().map(String::from),
                    description: o.description().to_string(),
                    attribute_name: o.attribute_name().to_string(),
                    default: o.default_value().cloned(),
                    flag: o.is_flag(),
                    multivalued: o.is_multivalued(),
                })
                .collect(),
            parameters: registry
                .parameters()
                .iter()
                .map(|p| ParameterSchema {
                    name: p.name().to_string(),
                    description: p.description().to_string(),
                    attribute_name: p.attribute_name().to_string(),
                    default: p.default_value().cloned(),
                    required: p.is_required(),
                    multivalued: p.is_multivalued(),
                })
                .collect(),
            subcommands,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a schema from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Finds a subcommand by name or alias.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandSchema> {
        self.subcommands
            .iter()
            .find(|s| s.name == name || s.aliases.iter().any(|a| a == name))
    }
}
