//! The run driver: parse, report, execute.
//!
//! [`run_with`] is the testable core, writing to caller-supplied streams;
//! [`run`] and [`run_from_env`] wire it to the process.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, info};

use crate::command::{Command, Context};
use crate::definition::Definition;
use crate::error::{CommandError, Result, UsageError};
use crate::settings::Settings;

/// Runs `definition` as `invocation_path` over `arguments`.
///
/// - Success: returns `0`.
/// - Help requested: writes help to `out`, returns `0`.
/// - Usage error: writes `ERROR: <message>` and `See: '<path> --help'` to
///   `err`, returns the configured usage exit code.
///
/// # Errors
///
/// Execution failures and stream write failures are returned unchanged.
///
/// # Examples
///
/// ```
/// use clasp_core::*;
///
/// let definition = Definition::builder()
///     .execute(|_, _| Err(UsageError::new("bad dog!").into()))
///     .build()
///     .unwrap();
///
/// let (mut out, mut err) = (Vec::new(), Vec::new());
/// let code = run_with(&definition, "cmd", Vec::<String>::new(), Context::new(),
///                     &Settings::default(), &mut out, &mut err).unwrap();
/// assert_eq!(code, 1);
/// assert_eq!(String::from_utf8(err).unwrap(), "ERROR: bad dog!\nSee: 'cmd --help'\n");
/// ```
pub fn run_with<I, S>(
    definition: &Arc<Definition>,
    invocation_path: &str,
    arguments: I,
    context: Context,
    settings: &Settings,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<u8>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let command = Command::new(Arc::clone(definition), invocation_path)
        .with_context(context)
        .with_settings(Arc::new(settings.clone()));

    match command.run(arguments, out) {
        Ok(()) => Ok(0),
        Err(CommandError::HelpWanted { help }) => {
            out.write_all(help.as_bytes())?;
            Ok(0)
        }
        Err(CommandError::Usage(error)) => {
            let path = error.invocation_path().unwrap_or(invocation_path);
            Ok(report_usage_error(err, path, &error, settings)?)
        }
        Err(other) => Err(other),
    }
}

fn report_usage_error(
    err: &mut dyn Write,
    invocation_path: &str,
    error: &UsageError,
    settings: &Settings,
) -> std::io::Result<u8> {
    info!(command = %invocation_path, error = %error, "Usage error");
    writeln!(err, "ERROR: {error}")?;
    writeln!(err, "See: '{invocation_path} --help'")?;
    Ok(settings.usage_error_exit_code)
}

/// Runs `definition` against the real stdout and stderr.
///
/// # Errors
///
/// See [`run_with`].
pub fn run<I, S>(
    definition: &Arc<Definition>,
    invocation_path: &str,
    arguments: I,
    context: Context,
    settings: &Settings,
) -> Result<ExitCode>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = run_with(
        definition,
        invocation_path,
        arguments,
        context,
        settings,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;
    Ok(ExitCode::from(code))
}

/// Runs `definition` with the process arguments, named after the program's
/// file name.
///
/// An argument that is not valid UTF-8 is reported as a usage error.
///
/// # Errors
///
/// See [`run_with`].
pub fn run_from_env(
    definition: &Arc<Definition>,
    context: Context,
    settings: &Settings,
) -> Result<ExitCode> {
    let mut args = std::env::args_os();
    let program = args.next().unwrap_or_default();
    let invocation_path = program_name(Path::new(&program));
    debug!(command = %invocation_path, "Running from process arguments");

    match utf8_arguments(args) {
        Ok(arguments) => run(definition, &invocation_path, arguments, context, settings),
        Err(error) => {
            let code =
                report_usage_error(&mut std::io::stderr().lock(), &invocation_path, &error, settings)?;
            Ok(ExitCode::from(code))
        }
    }
}

fn utf8_arguments(
    args: impl IntoIterator<Item = OsString>,
) -> std::result::Result<Vec<String>, UsageError> {
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                UsageError::new(format!(
                    "invalid UTF-8 in argument '{}'",
                    raw.to_string_lossy()
                ))
            })
        })
        .collect()
}

fn program_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_strips_directories() {
        assert_eq!(program_name(Path::new("/usr/local/bin/speak")), "speak");
        assert_eq!(program_name(Path::new("speak")), "speak");
        assert_eq!(program_name(Path::new("")), "");
    }

    #[test]
    fn test_utf8_arguments_accepts_text() {
        let args = vec![OsString::from("speak"), OsString::from("héllo")];
        assert_eq!(utf8_arguments(args).unwrap(), vec!["speak", "héllo"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_utf8_arguments_rejects_invalid_bytes() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![OsString::from("speak"), OsString::from_vec(vec![b'h', 0xff])];
        let error = utf8_arguments(args).unwrap_err();
        assert_eq!(error.message(), "invalid UTF-8 in argument 'h\u{fffd}'");
    }
}
