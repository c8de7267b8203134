//! Lexer for the substitution format language
//!
//! A format string is literal text with embedded command tokens:
//!
//! ```text
//! [%START_TIME%] "%REQ(:METHOD)%" %RESPONSE_CODE:3% took %DURATION%ms
//! ```
//!
//! The lexer splits the string into three kinds of token: `%%` escapes,
//! whole command tokens of the shape `%NAME(SUBCOMMAND):LENGTH%` (the
//! subcommand and length parts each optional), and runs of literal text.
//! Any `%` that does not begin an escape or a well-formed command token
//! fails to lex; [`tokenize`] surfaces that as an error entry carrying the
//! offending span so the caller can report the exact position.

use logos::{Logos, Span};

/// One token of a format string.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Token {
    /// An escaped percent sign, rendered as a single literal `%`.
    #[token("%%")]
    Escape,

    /// A complete command token, e.g. `%DURATION%`, `%REQ(:PATH)%`,
    /// `%RESPONSE_CODE:3%`. Command names are uppercase alphanumerics and
    /// underscores; the parenthesized subcommand may hold any character
    /// except `)`.
    #[regex(r"%[A-Z0-9_]+(\([^)]*\))?(:[0-9]+)?%")]
    Command,

    /// A run of literal text, everything up to the next `%`.
    #[regex(r"[^%]+")]
    Text,
}

impl Token {
    /// True for tokens that contribute to a literal run.
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Escape | Token::Text)
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Token::Command)
    }
}

/// Tokenize a format string, yielding each token with its span.
///
/// Lexing failures are kept in the stream as `Err(())` entries rather than
/// aborting, so the parser can turn them into positioned errors.
pub fn tokenize(format: &str) -> Vec<(Result<Token, ()>, Span)> {
    let mut lexer = Token::lexer(format);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        tokens.push((result, lexer.span()));
    }
    tokens
}
