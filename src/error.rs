//! Error types for format compilation
//!
//! Every error in this crate is a configuration-time error: a format string
//! or structured template that fails to compile. Evaluation never fails.
//! A field that is missing for a particular record is data (an absent
//! value), not a fault.

use std::fmt;

/// Errors raised while compiling a format string or a structured template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No valid command token starts at `position` in `format`.
    Command { format: String, position: usize },
    /// A `:LENGTH` specifier that does not parse as an unsigned integer.
    Length { given: String },
    /// A structured template value of a kind the compiler does not accept.
    UnsupportedKind { kind: &'static str },
    /// No resolver factory is registered for a configuration type.
    UnknownConfigType { type_id: String },
    /// A resolver factory declined to build a resolver from its config.
    Factory { name: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Command { format, position } => write!(
                f,
                "Incorrect format: {}. Couldn't find valid command at position {}",
                format, position
            ),
            FormatError::Length { given } => {
                write!(f, "Length must be an integer, given: {}", given)
            }
            FormatError::UnsupportedKind { kind } => write!(
                f,
                "Only strings, numbers, nested maps and lists are supported in structured templates, got: {}",
                kind
            ),
            FormatError::UnknownConfigType { type_id } => {
                write!(f, "Didn't find a registered factory for config type: {}", type_id)
            }
            FormatError::Factory { name } => {
                write!(f, "Factory {} failed to create a resolver from its config", name)
            }
        }
    }
}

impl std::error::Error for FormatError {}
