//! Error types for parsing and running commands.
//!
//! Two error kinds matter to callers of [`Command::parse`](crate::Command::parse):
//!
//! - [`UsageError`]: the user typed something the definition does not
//!   accept. Always carries a printable message.
//! - [`ArgumentError`]: raised by converters and attribute writers. It never
//!   leaves the parser: the binder turns it into a [`UsageError`] naming the
//!   option or parameter being bound.
//!
//! Everything a command run can fail with is collected in [`CommandError`].

use thiserror::Error;

/// A user-input mistake: unknown switch, missing or extra argument, rejected
/// value, unknown subcommand.
///
/// # Examples
///
/// ```
/// use clasp_core::UsageError;
///
/// let error = UsageError::new("too many arguments");
/// assert_eq!(error.to_string(), "too many arguments");
/// assert!(error.invocation_path().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct UsageError {
    message: String,
    invocation_path: Option<String>,
}

impl UsageError {
    /// Creates a usage error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            invocation_path: None,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Invocation path of the command that signalled the error, once known.
    pub fn invocation_path(&self) -> Option<&str> {
        self.invocation_path.as_deref()
    }

    /// Records the invocation path unless a deeper command already did.
    pub(crate) fn located(mut self, invocation_path: &str) -> Self {
        if self.invocation_path.is_none() {
            self.invocation_path = Some(invocation_path.to_string());
        }
        self
    }
}

/// Rejection raised by a converter or attribute writer.
///
/// # Examples
///
/// ```
/// use clasp_core::ArgumentError;
///
/// let error = ArgumentError::new("sorry, we're out of red");
/// assert_eq!(error.message(), "sorry, we're out of red");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ArgumentError {
    message: String,
}

impl ArgumentError {
    /// Creates an argument error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Token cursor failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The cursor has no tokens left.
    #[error("no value provided")]
    NoValue,
}

impl From<CursorError> for ArgumentError {
    fn from(error: CursorError) -> Self {
        ArgumentError::new(error.to_string())
    }
}

/// Errors produced while parsing or running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The user supplied arguments the definition does not accept.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A help switch was given; carries the rendered help of the command
    /// that saw it.
    #[error("help requested")]
    HelpWanted {
        /// Rendered help text.
        help: String,
    },

    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The command's execution behaviour failed.
    #[error("{0}")]
    Execution(Box<dyn std::error::Error + Send + Sync>),
}

impl CommandError {
    /// Wraps an arbitrary failure raised while executing a command.
    ///
    /// # Examples
    ///
    /// ```
    /// use clasp_core::CommandError;
    ///
    /// let error = CommandError::execution("disk on fire");
    /// assert_eq!(error.to_string(), "disk on fire");
    /// ```
    pub fn execution(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CommandError::Execution(error.into())
    }

    /// Returns the usage error, if this is one.
    pub fn as_usage(&self) -> Option<&UsageError> {
        match self {
            CommandError::Usage(error) => Some(error),
            _ => None,
        }
    }

    pub(crate) fn located(self, invocation_path: &str) -> Self {
        match self {
            CommandError::Usage(error) => CommandError::Usage(error.located(invocation_path)),
            other => other,
        }
    }
}

/// Convenience alias for results with [`CommandError`].
pub type Result<T, E = CommandError> = std::result::Result<T, E>;
