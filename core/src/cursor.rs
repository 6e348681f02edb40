//! Mutable view over the arguments still to be parsed.

use std::fmt;

use tracing::trace;

use crate::error::CursorError;

/// The option terminator; everything after it is positional.
pub const TERMINATOR: &str = "--";

/// How the parser treats a raw token.
///
/// # Examples
///
/// ```
/// use clasp_core::TokenKind;
///
/// assert_eq!(TokenKind::classify("--"), TokenKind::Terminator);
/// assert_eq!(TokenKind::classify("--flavour=mint"), TokenKind::LongOption);
/// assert_eq!(TokenKind::classify("-nf"), TokenKind::ShortCluster);
/// assert_eq!(TokenKind::classify("-"), TokenKind::Positional);
/// assert_eq!(TokenKind::classify("wallop"), TokenKind::Positional);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Exactly `--`.
    Terminator,
    /// Starts with `--`.
    LongOption,
    /// Starts with `-`, other than a lone `-`.
    ShortCluster,
    /// Anything else.
    Positional,
}

impl TokenKind {
    /// Classifies a raw token.
    pub fn classify(token: &str) -> Self {
        if token == TERMINATOR {
            TokenKind::Terminator
        } else if token.starts_with("--") {
            TokenKind::LongOption
        } else if token.starts_with('-') && token != "-" {
            TokenKind::ShortCluster
        } else {
            TokenKind::Positional
        }
    }

    /// Returns `true` for long options and short clusters.
    pub fn is_switch(self) -> bool {
        matches!(self, TokenKind::LongOption | TokenKind::ShortCluster)
    }
}

/// Ordered tokens left to parse, front first.
///
/// Stored reversed so that consuming the front token is a `pop`.
///
/// # Examples
///
/// ```
/// use clasp_core::TokenCursor;
///
/// let mut cursor = TokenCursor::new(["-f", "strawberry"]);
/// assert_eq!(cursor.peek(), Some("-f"));
/// assert_eq!(cursor.consume().unwrap(), "-f");
/// assert_eq!(cursor.take_all(), vec!["strawberry".to_string()]);
/// assert!(cursor.is_empty());
/// assert!(cursor.consume().is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenCursor {
    rargs: Vec<String>,
}

impl TokenCursor {
    /// Creates a cursor over `args`, in order.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rargs: Vec<String> = args.into_iter().map(Into::into).collect();
        rargs.reverse();
        Self { rargs }
    }

    /// The front token, if any.
    pub fn peek(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str)
    }

    /// Classification of the front token, if any.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        let kind = self.peek().map(TokenKind::classify);
        trace!(token = ?self.peek(), ?kind, "Classified token");
        kind
    }

    /// Removes and returns the front token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::NoValue`] when the cursor is empty.
    pub fn consume(&mut self) -> Result<String, CursorError> {
        self.rargs.pop().ok_or(CursorError::NoValue)
    }

    /// Puts `token` back at the front.
    pub fn push_front(&mut self, token: impl Into<String>) {
        self.rargs.push(token.into());
    }

    /// Removes and returns every remaining token, in order.
    pub fn take_all(&mut self) -> Vec<String> {
        let mut args = std::mem::take(&mut self.rargs);
        args.reverse();
        args
    }

    /// Returns `true` if no tokens remain.
    pub fn is_empty(&self) -> bool {
        self.rargs.is_empty()
    }

    /// Number of remaining tokens.
    pub fn len(&self) -> usize {
        self.rargs.len()
    }
}

impl fmt::Debug for TokenCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rargs.iter().rev()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lone_dash_is_positional() {
        assert_eq!(TokenKind::classify("-"), TokenKind::Positional);
        assert!(!TokenKind::classify("-").is_switch());
    }

    #[test]
    fn test_classify_switches() {
        assert!(TokenKind::classify("--nuts").is_switch());
        assert!(TokenKind::classify("-n").is_switch());
        assert!(!TokenKind::classify("--").is_switch());
    }

    #[test]
    fn test_push_front_then_consume() {
        let mut cursor = TokenCursor::new(["b"]);
        cursor.push_front("a");
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.consume(), Ok("a".to_string()));
        assert_eq!(cursor.consume(), Ok("b".to_string()));
        assert_eq!(cursor.consume(), Err(CursorError::NoValue));
    }

    #[test]
    fn test_debug_lists_front_first() {
        let cursor = TokenCursor::new(["crash", "bang"]);
        assert_eq!(format!("{cursor:?}"), r#"["crash", "bang"]"#);
    }
}
