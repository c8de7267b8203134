//! Format string compiler
//!
//! Compilation happens in two passes. [`scan`] splits a format string into
//! ordered [`Segment`]s, collapsing `%%` escapes into the surrounding
//! literal runs, and rejects the whole string on the first ill-formed
//! token. [`parse`] then binds each command segment to a provider through
//! the resolution chain. Splitting the passes keeps the grammar concerns
//! out of resolution and gives tooling a place to inspect a format without
//! compiling it.
//!
//! Scanning guarantees a non-empty result: an empty format yields exactly
//! one empty literal segment, and compiled provider sequences inherit that
//! floor of one element.

use serde::Serialize;

use crate::command::Command;
use crate::error::FormatError;
use crate::lexer::{tokenize, Token};
use crate::provider::Provider;
use crate::resolver::{resolve_command, CommandResolver};

/// One syntactic piece of a format string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// A run of literal text with escapes already collapsed.
    Literal { text: String },
    /// A parsed command token.
    Command { command: Command },
}

/// Scan a format string into its ordered segments.
///
/// Literal text accumulates across `%%` escapes and flushes when a command
/// token begins, so consecutive literal pieces always merge into one
/// segment. Any `%` that does not start an escape or a well-formed command
/// token fails the scan with the byte position of the offending `%`.
pub fn scan(format: &str) -> Result<Vec<Segment>, FormatError> {
    let mut segments = Vec::new();
    let mut literal = String::new();

    for (token, span) in tokenize(format) {
        match token {
            Ok(Token::Text) => literal.push_str(&format[span]),
            Ok(Token::Escape) => literal.push('%'),
            Ok(Token::Command) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal {
                        text: std::mem::take(&mut literal),
                    });
                }
                let command =
                    Command::from_token(&format[span.clone()]).map_err(|error| match error {
                        FormatError::Command { .. } => FormatError::Command {
                            format: format.to_string(),
                            position: span.start,
                        },
                        other => other,
                    })?;
                segments.push(Segment::Command { command });
            }
            Err(()) => {
                return Err(FormatError::Command {
                    format: format.to_string(),
                    position: span.start,
                });
            }
        }
    }

    // Trailing literal text still needs a segment; an empty format gets
    // one empty literal so callers never see an empty sequence.
    if !literal.is_empty() || format.is_empty() {
        segments.push(Segment::Literal { text: literal });
    }

    Ok(segments)
}

/// Compile a format string into providers, consulting only the process
/// built-ins and the record-lookup fallback.
pub fn parse(format: &str) -> Result<Vec<Provider>, FormatError> {
    parse_with_resolvers(format, &[])
}

/// Compile a format string, consulting `resolvers` after the process
/// built-ins and before the record-lookup fallback.
pub fn parse_with_resolvers(
    format: &str,
    resolvers: &[Box<dyn CommandResolver>],
) -> Result<Vec<Provider>, FormatError> {
    let segments = scan(format)?;
    let mut providers = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal { text } => providers.push(Provider::Literal(text)),
            Segment::Command { command } => providers.push(resolve_command(&command, resolvers)),
        }
    }
    Ok(providers)
}
