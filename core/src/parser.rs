//! The token-matching algorithm.
//!
//! Parsing runs in two phases over a command's [`TokenCursor`]:
//!
//! 1. Option scanning. While the front token looks like a switch it is
//!    resolved against the registry and bound. Scanning stops at the first
//!    positional token or after the `--` terminator, which is discarded.
//!    Anything after that point is positional, however it looks.
//! 2. Positional consumption. Declared parameters take their share of the
//!    remaining tokens in order, or, for a definition with subcommands, the
//!    first remaining token selects the subcommand and the rest is handed to
//!    it unparsed.
//!
//! [`TokenCursor`]: crate::TokenCursor

use std::sync::Arc;

use tracing::debug;

use crate::binder;
use crate::command::{Command, PendingSubcommand};
use crate::cursor::TokenKind;
use crate::error::{ArgumentError, CommandError, Result, UsageError};
use crate::types::Declaration;

/// One switch occurrence, split from its token.
struct SwitchToken {
    switch: String,
    attached: Option<String>,
}

/// Binds every leading option token.
pub(crate) fn parse_options(command: &mut Command) -> Result<()> {
    let definition = Arc::clone(command.definition());

    loop {
        let kind = match command.remaining_arguments.peek_kind() {
            None | Some(TokenKind::Positional) => break,
            Some(kind) => kind,
        };
        let Ok(token) = command.remaining_arguments.consume() else {
            break;
        };
        if kind == TokenKind::Terminator {
            debug!("Option terminator seen");
            break;
        }

        let SwitchToken { switch, attached } = match kind {
            TokenKind::LongOption => split_long(token),
            _ => split_short(command, token)?,
        };

        let Some(option) = definition.registry().find_option(&switch) else {
            if command.settings().is_help_switch(&switch) {
                debug!(switch = %switch, "Help requested");
                return Err(CommandError::HelpWanted {
                    help: command.help(),
                });
            }
            return Err(UsageError::new(format!("No such option '{switch}'")).into());
        };

        let outcome = match attached {
            Some(_) if option.is_flag() => Err(ArgumentError::new("does not take a value")),
            Some(raw) => option.convert(&raw),
            None => option.extract_value(&switch, &mut command.remaining_arguments),
        };
        binder::bind(
            &mut command.attributes,
            Declaration::Option(option),
            outcome.map(Some),
        )?;
    }

    Ok(())
}

/// `--flavour=strawberry` → (`--flavour`, `strawberry`).
fn split_long(token: String) -> SwitchToken {
    match token.split_once('=') {
        Some((switch, value)) => SwitchToken {
            switch: switch.to_string(),
            attached: Some(value.to_string()),
        },
        None => SwitchToken {
            switch: token,
            attached: None,
        },
    }
}

/// Splits the first character off a short cluster.
///
/// When that character is a flag the rest of the cluster is queued as a new
/// cluster; otherwise the rest, if any, is the option's value.
fn split_short(command: &mut Command, token: String) -> Result<SwitchToken> {
    let mut chars = token.chars().skip(1);
    let first = chars.next().unwrap_or('-');
    let rest: String = chars.collect();
    let switch = format!("-{first}");

    if rest.is_empty() {
        return Ok(SwitchToken {
            switch,
            attached: None,
        });
    }

    let is_flag = command
        .definition()
        .registry()
        .find_option(&switch)
        .map(|option| option.is_flag());
    match is_flag {
        Some(true) => {
            command.remaining_arguments.push_front(format!("-{rest}"));
            Ok(SwitchToken {
                switch,
                attached: None,
            })
        }
        Some(false) => Ok(SwitchToken {
            switch,
            attached: Some(rest),
        }),
        None => Err(UsageError::new(format!("No such option '{switch}'")).into()),
    }
}

/// Binds declared parameters from the remaining tokens.
pub(crate) fn parse_parameters(command: &mut Command) -> Result<()> {
    let definition = Arc::clone(command.definition());

    for parameter in definition.registry().parameters() {
        let outcome = parameter.consume(&mut command.remaining_arguments);
        binder::bind(
            &mut command.attributes,
            Declaration::Parameter(parameter),
            outcome,
        )?;
    }

    if !command.remaining_arguments.is_empty() {
        return Err(UsageError::new("too many arguments").into());
    }
    Ok(())
}

/// Resolves the subcommand named by the first remaining token.
pub(crate) fn parse_subcommand(command: &mut Command) -> Result<()> {
    let definition = Arc::clone(command.definition());

    let Ok(name) = command.remaining_arguments.consume() else {
        return Err(UsageError::new("no subcommand specified").into());
    };
    let Some(subcommand) = definition.registry().find_subcommand(&name) else {
        return Err(UsageError::new(format!("No such sub-command '{name}'")).into());
    };

    let arguments = command.remaining_arguments.take_all();
    debug!(
        subcommand = %subcommand.name(),
        arguments = ?arguments,
        "Resolved subcommand"
    );
    command.pending_subcommand = Some(PendingSubcommand {
        declaration: Arc::clone(subcommand),
        name,
        arguments,
    });
    Ok(())
}

