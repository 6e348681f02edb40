use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clasp_core::{
    ArgumentError, Command, CommandError, Context, Definition, OptionDecl, ParameterDecl, Settings,
    SubcommandDecl, UsageError, Value, convert, run_from_env,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming an optional YAML settings file.
const SETTINGS_ENV: &str = "CLASP_DEMO_SETTINGS";

fn speak() -> Arc<Definition> {
    Definition::builder()
        .description("Say something.")
        .option(OptionDecl::flag(&["--loud"], "say it loud"))
        .option(
            OptionDecl::valued(&["-n", "--iterations"], "N", "say it N times")
                .with_default(1)
                .with_converter(convert::integer)
                .with_writer(|value| match value.as_integer() {
                    Some(n) if n < 0 => Err(ArgumentError::new("must not be negative")),
                    _ => Ok(value),
                }),
        )
        .parameter(ParameterDecl::new("WORDS ...", "the thing to say"))
        .execute(|command, out| {
            let words: Vec<String> = command
                .read_list("words_list")
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect();
            let mut message = words.join(" ");
            if command.flag("loud") {
                message = message.to_uppercase();
            }
            let times = command
                .read("iterations")
                .and_then(Value::as_integer)
                .unwrap_or(1);
            if command.parent().is_some_and(|parent| parent.flag("verbose")) {
                writeln!(out, "(saying it {times} times)")?;
            }
            for _ in 0..times {
                writeln!(out, "{message}")?;
            }
            Ok(())
        })
        .build()
        .expect("static definition must be valid")
}

fn printer(description: &str, output: &'static str) -> Arc<Definition> {
    Definition::builder()
        .description(description)
        .execute(move |_, out| Ok(writeln!(out, "{output}")?))
        .build()
        .expect("static definition must be valid")
}

fn version() -> Arc<Definition> {
    Definition::builder()
        .description("Show the version.")
        .execute(|command, out| {
            let version = command
                .context()
                .get("version")
                .cloned()
                .unwrap_or(Value::from("unknown"));
            Ok(writeln!(out, "{} {version}", root_name(command))?)
        })
        .build()
        .expect("static definition must be valid")
}

fn schema() -> Arc<Definition> {
    Definition::builder()
        .description("Print the command schema as JSON.")
        .parameter(ParameterDecl::new(
            "[SUBCOMMAND]",
            "limit the output to one subcommand",
        ))
        .execute(|command, out| {
            let Some(parent) = command.parent() else {
                return Err(CommandError::execution("schema must run as a subcommand"));
            };
            let root = parent.definition().schema();
            let json = match command.read_str("subcommand") {
                Some(name) => {
                    let subcommand = root.find_subcommand(name).ok_or_else(|| {
                        UsageError::new(format!("No such sub-command '{name}'"))
                    })?;
                    subcommand.definition.to_json()
                }
                None => root.to_json(),
            }
            .map_err(CommandError::execution)?;
            Ok(writeln!(out, "{json}")?)
        })
        .build()
        .expect("static definition must be valid")
}

fn root_name(command: &Command) -> &str {
    command
        .invocation_path()
        .split_whitespace()
        .next()
        .unwrap_or("clasp-demo")
}

fn root() -> Arc<Definition> {
    Definition::builder()
        .description(
            "
            Demonstrates declarative argument parsing.

            Set RUST_LOG=debug to trace how arguments are bound.
            ",
        )
        .option(OptionDecl::flag(&["-v", "--verbose"], "be louder"))
        .subcommand(SubcommandDecl::with_factory("speak", "Say something", speak).with_alias("say"))
        .subcommand(SubcommandDecl::new("flip", "Flip it", printer("Flip it.", "FLIPPED")))
        .subcommand(SubcommandDecl::new("flop", "Flop it", printer("Flop it.", "FLOPPED")))
        .subcommand(SubcommandDecl::new("version", "Show the version", version()))
        .subcommand(SubcommandDecl::new("schema", "Print the command schema", schema()))
        .build()
        .expect("static definition must be valid")
}

fn load_settings() -> Result<Settings, Box<dyn Error>> {
    let Some(path) = std::env::var_os(SETTINGS_ENV) else {
        return Ok(Settings::default());
    };
    let path = Path::new(&path);
    if !path.exists() {
        warn!(path = %path.display(), "Settings file not found, using defaults");
        return Ok(Settings::default());
    }
    debug!(path = %path.display(), "Loading settings");
    Ok(Settings::load(path)?)
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings()?;
    let mut context = Context::new();
    context.insert("version".to_string(), Value::from(PACKAGE_VERSION));

    Ok(run_from_env(&root(), context, &settings)?)
}
