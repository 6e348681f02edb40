//! Help text rendering.
//!
//! ```text
//! Usage: cmd [OPTIONS] [ARG] ...
//!
//! Parameters:
//!   [ARG] ...            extra arguments
//!
//! Options:
//!   -f, --flavour FLAVOUR Flavour of the month
//! ```

use crate::definition::Definition;

/// Renders help for `definition` invoked as `invocation_path`.
///
/// Detail rows are laid out as `"  %-<width>s %s"`.
pub fn render(definition: &Definition, invocation_path: &str, width: usize) -> String {
    let mut help = String::new();

    for (i, usage) in definition.usage_descriptions().iter().enumerate() {
        let prefix = if i == 0 { "Usage: " } else { "       " };
        let line = format!("{prefix}{invocation_path} {usage}");
        help.push_str(line.trim_end());
        help.push('\n');
    }

    if let Some(description) = definition.description() {
        help.push_str(&format!("\n{description}\n"));
    }

    let registry = definition.registry();
    if registry.has_parameters() {
        let rows = registry.parameters().iter().map(|p| p.help_row());
        write_section(&mut help, "Parameters:", rows, width);
    }
    if registry.has_subcommands() {
        let rows = registry.subcommands().iter().map(|s| s.help_row());
        write_section(&mut help, "Subcommands:", rows, width);
    }
    if registry.has_options() {
        let rows = registry.options().iter().map(|o| o.help_row());
        write_section(&mut help, "Options:", rows, width);
    }

    help
}

fn write_section(
    help: &mut String,
    title: &str,
    rows: impl Iterator<Item = (String, String)>,
    width: usize,
) {
    help.push_str(&format!("\n{title}\n"));
    for (left, right) in rows {
        let row = format!("  {left:<width$} {right}");
        help.push_str(row.trim_end());
        help.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OptionDecl, ParameterDecl, SubcommandDecl};

    #[test]
    fn test_render_bare_command() {
        let definition = Definition::builder().build().unwrap();
        assert_eq!(render(&definition, "cmd", 20), "Usage: cmd\n");
    }

    #[test]
    fn test_render_sections_in_order() {
        let definition = Definition::builder()
            .option(OptionDecl::valued(&["--nodes"], "N", "number of nodes").with_default(2))
            .parameter(ParameterDecl::new("X", "x"))
            .description("Does things.")
            .build()
            .unwrap();

        let expected = "\
Usage: cmd [OPTIONS] X

Does things.

Parameters:
  X                    x

Options:
  --nodes N            number of nodes (default: 2)
";
        assert_eq!(render(&definition, "cmd", 20), expected);
    }

    #[test]
    fn test_render_multiple_usages_are_aligned() {
        let definition = Definition::builder()
            .usage("THIS HERE")
            .usage("THAT THERE")
            .build()
            .unwrap();
        assert_eq!(
            render(&definition, "put", 20),
            "Usage: put THIS HERE\n       put THAT THERE\n"
        );
    }

    #[test]
    fn test_render_subcommands() {
        let leaf = Definition::builder().build().unwrap();
        let definition = Definition::builder()
            .subcommand(SubcommandDecl::new("flip", "flip it", leaf).with_alias("f"))
            .build()
            .unwrap();
        let help = render(&definition, "flipflop", 10);
        assert!(help.starts_with("Usage: flipflop SUBCOMMAND [ARGS] ...\n"));
        assert!(help.contains("\nSubcommands:\n  flip, f    flip it\n"));
    }

    #[test]
    fn test_render_long_switch_overflows_column() {
        let definition = Definition::builder()
            .option(OptionDecl::valued(&["-f", "--flavour"], "FLAVOUR", "Flavour of the month"))
            .build()
            .unwrap();
        let help = render(&definition, "cmd", 20);
        assert!(help.contains("  -f, --flavour FLAVOUR Flavour of the month\n"));
    }
}
