//! Writes resolved values into a command's attribute slots.
//!
//! This is the only place an [`ArgumentError`] is turned into a
//! [`UsageError`]: the message gains the kind and name of the declaration
//! being bound (`option '--color': ...`, `parameter 'Y': ...`).

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ArgumentError, UsageError};
use crate::types::{Declaration, Value};

/// Attribute slots of one command instance.
pub(crate) type Attributes = HashMap<String, Value>;

/// Runs the declaration's write accessor and stores the result.
///
/// Multivalued options append to their list; everything else replaces the
/// previous value.
pub(crate) fn store(
    attributes: &mut Attributes,
    declaration: Declaration<'_>,
    value: Value,
) -> Result<(), ArgumentError> {
    let value = declaration.write(value)?;
    let attribute = declaration.attribute_name();
    debug!(
        kind = declaration.kind(),
        name = declaration.name(),
        attribute,
        value = %value,
        "Binding attribute"
    );

    if declaration.accumulates() {
        match attributes.get_mut(attribute) {
            Some(Value::List(items)) => items.push(value),
            _ => {
                attributes.insert(attribute.to_string(), Value::List(vec![value]));
            }
        }
    } else {
        attributes.insert(attribute.to_string(), value);
    }
    Ok(())
}

/// Translates a converter or writer failure into a usage error.
pub(crate) fn annotate(declaration: Declaration<'_>, error: ArgumentError) -> UsageError {
    UsageError::new(format!(
        "{} '{}': {}",
        declaration.kind(),
        declaration.name(),
        error.message()
    ))
}

/// Stores `outcome` if it succeeded, translating any failure.
pub(crate) fn bind(
    attributes: &mut Attributes,
    declaration: Declaration<'_>,
    outcome: Result<Option<Value>, ArgumentError>,
) -> Result<(), UsageError> {
    let result = outcome.and_then(|value| match value {
        Some(value) => store(attributes, declaration, value),
        None => Ok(()),
    });
    result.map_err(|error| annotate(declaration, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionDecl, ParameterDecl};

    #[test]
    fn test_multivalued_option_appends() {
        let include = OptionDecl::valued(&["--include"], "DIR", "search path").allow_multiple();
        let mut attributes = Attributes::new();

        store(&mut attributes, Declaration::Option(&include), "a".into()).unwrap();
        store(&mut attributes, Declaration::Option(&include), "b".into()).unwrap();

        assert_eq!(
            attributes.get("include_list"),
            Some(&Value::from(vec!["a", "b"]))
        );
    }

    #[test]
    fn test_writer_failure_is_annotated() {
        let color = OptionDecl::valued(&["-c", "--color"], "COLOR", "Preferred hue").with_writer(
            |value| match value.as_str() {
                Some("black") => Ok(value),
                other => Err(ArgumentError::new(format!(
                    "sorry, we're out of {}",
                    other.unwrap_or_default()
                ))),
            },
        );
        let mut attributes = Attributes::new();

        let error = bind(
            &mut attributes,
            Declaration::Option(&color),
            Ok(Some("red".into())),
        )
        .unwrap_err();
        assert_eq!(error.message(), "option '--color': sorry, we're out of red");
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_missing_parameter_is_annotated() {
        let y = ParameterDecl::new("Y", "y");
        let mut attributes = Attributes::new();

        let error = bind(
            &mut attributes,
            Declaration::Parameter(&y),
            Err(ArgumentError::new("no value provided")),
        )
        .unwrap_err();
        assert_eq!(error.message(), "parameter 'Y': no value provided");
    }

    #[test]
    fn test_absent_value_leaves_slot_untouched() {
        let z = ParameterDecl::new("[Z]", "z");
        let mut attributes = Attributes::new();
        bind(&mut attributes, Declaration::Parameter(&z), Ok(None)).unwrap();
        assert!(attributes.get("z").is_none());
    }
}
