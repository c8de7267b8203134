//! Parsed command tokens
//!
//! A [`Command`] is the structured form of one `%...%` token: the command
//! name, the optional parenthesized subcommand, and the optional output
//! length cap. Note that an absent subcommand (`%DURATION%`) and an
//! empty one (`%DURATION()%`) are different values; resolvers may treat
//! them differently.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::FormatError;

/// Capture groups: 1 = name, 2 = subcommand (absent when there are no
/// parentheses), 3 = length (absent when there is no `:LENGTH` part).
static COMMAND_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%([A-Z0-9_]+)(?:\(([^)]*)\))?(?::([0-9]+))?%$").unwrap());

/// One parsed command token: `%NAME(SUBCOMMAND):LENGTH%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    /// Command name, uppercase alphanumerics and underscores.
    pub name: String,
    /// Parenthesized argument, `None` when the parentheses are absent.
    pub subcommand: Option<String>,
    /// Maximum output length in characters.
    pub max_length: Option<usize>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            subcommand: None,
            max_length: None,
        }
    }

    pub fn with_subcommand(mut self, subcommand: impl Into<String>) -> Self {
        self.subcommand = Some(subcommand.into());
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Parse a whole command token, `%` to `%`, into its parts.
    ///
    /// The token is expected to already have the command shape (the lexer
    /// guarantees that); a length that overflows `usize` is the one way a
    /// lexed token can still fail here.
    pub fn from_token(token: &str) -> Result<Self, FormatError> {
        let captures = COMMAND_REGEX
            .captures(token)
            .ok_or_else(|| FormatError::Command {
                format: token.to_string(),
                position: 0,
            })?;
        let max_length = match captures.get(3) {
            None => None,
            Some(digits) => Some(digits.as_str().parse::<usize>().map_err(|_| {
                FormatError::Length {
                    given: digits.as_str().to_string(),
                }
            })?),
        };
        Ok(Command {
            name: captures[1].to_string(),
            subcommand: captures.get(2).map(|m| m.as_str().to_string()),
            max_length,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.name)?;
        if let Some(subcommand) = &self.subcommand {
            write!(f, "({})", subcommand)?;
        }
        if let Some(max_length) = self.max_length {
            write!(f, ":{}", max_length)?;
        }
        write!(f, "%")
    }
}

/// Split a `KEY:VALUE` subcommand at the first `:`.
///
/// Commands that address nested data use this convention, e.g.
/// `%METADATA(namespace:key)%`. The value half is `None` when there is no
/// separator at all, which is distinct from an empty value after a
/// trailing separator.
pub fn split_subcommand(subcommand: &str) -> (&str, Option<&str>) {
    match subcommand.split_once(':') {
        Some((key, value)) => (key, Some(value)),
        None => (subcommand, None),
    }
}
