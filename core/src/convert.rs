//! Ready-made converters for [`OptionDecl::with_converter`] and
//! [`ParameterDecl::with_converter`].
//!
//! [`OptionDecl::with_converter`]: crate::OptionDecl::with_converter
//! [`ParameterDecl::with_converter`]: crate::ParameterDecl::with_converter

use crate::error::ArgumentError;
use crate::types::Value;

/// Parses a whole number.
///
/// # Examples
///
/// ```
/// use clasp_core::{Value, convert};
///
/// assert_eq!(convert::integer("1234"), Ok(Value::Integer(1234)));
/// assert_eq!(
///     convert::integer("blah").unwrap_err().message(),
///     "invalid value for Integer: \"blah\""
/// );
/// ```
pub fn integer(raw: &str) -> Result<Value, ArgumentError> {
    raw.trim()
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| ArgumentError::new(format!("invalid value for Integer: \"{raw}\"")))
}

/// Parses a floating point number.
pub fn float(raw: &str) -> Result<Value, ArgumentError> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|_| ArgumentError::new(format!("invalid value for Float: \"{raw}\"")))
}

/// Returns a converter accepting only the listed choices.
///
/// # Examples
///
/// ```
/// use clasp_core::convert;
///
/// let format = convert::one_of(&["json", "yaml"]);
/// assert!(format("json").is_ok());
/// assert_eq!(
///     format("toml").unwrap_err().message(),
///     "must be one of: json, yaml"
/// );
/// ```
pub fn one_of(
    choices: &[&str],
) -> impl Fn(&str) -> Result<Value, ArgumentError> + Send + Sync + use<> {
    let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
    move |raw: &str| {
        if choices.iter().any(|c| c == raw) {
            Ok(Value::String(raw.to_string()))
        } else {
            Err(ArgumentError::new(format!(
                "must be one of: {}",
                choices.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_trims_whitespace() {
        assert_eq!(integer(" 42 "), Ok(Value::Integer(42)));
    }

    #[test]
    fn test_float_rejects_text() {
        assert_eq!(float("2.5"), Ok(Value::Float(2.5)));
        assert_eq!(
            float("lots").unwrap_err().message(),
            "invalid value for Float: \"lots\""
        );
    }
}
