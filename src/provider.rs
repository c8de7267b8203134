//! Compiled format providers
//!
//! Compilation turns a format string into a sequence of providers, one per
//! segment. Evaluation then walks the sequence per record. Literal and
//! numeric providers carry their output with them; command providers defer
//! to whatever component resolution bound them to.

use std::fmt;

use serde_json::Value;

use crate::record::Record;

/// Marker substituted for absent values in flat output.
pub const DEFAULT_EMPTY_VALUE: &str = "-";

/// A value-producing component bound to one command.
///
/// `format` is the flat text evaluation; `None` means the value is not
/// available for this record, which is distinct from an available but
/// empty string. `format_value` is the typed evaluation used when type
/// preservation is requested; the default keeps the text form, mapping
/// absence to null.
pub trait CommandProvider: Send + Sync {
    fn format(&self, record: &dyn Record) -> Option<String>;

    fn format_value(&self, record: &dyn Record) -> Value {
        match self.format(record) {
            Some(text) => Value::String(text),
            None => Value::Null,
        }
    }
}

/// One compiled unit of a format string or template leaf.
pub enum Provider {
    /// A fixed piece of text. Always available, even when empty.
    Literal(String),
    /// A numeric literal from a structured template.
    Number(serde_json::Number),
    /// A command bound to a value-producing component.
    Command(Box<dyn CommandProvider>),
}

impl Provider {
    pub fn format(&self, record: &dyn Record) -> Option<String> {
        match self {
            Provider::Literal(text) => Some(text.clone()),
            Provider::Number(number) => Some(number.to_string()),
            Provider::Command(provider) => provider.format(record),
        }
    }

    pub fn format_value(&self, record: &dyn Record) -> Value {
        match self {
            Provider::Literal(text) => Value::String(text.clone()),
            Provider::Number(number) => Value::Number(number.clone()),
            Provider::Command(provider) => provider.format_value(record),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Provider::Literal(_))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Provider::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Provider::Command(_) => f.write_str("Command(..)"),
        }
    }
}

/// Truncate `value` to at most `max_length` characters.
///
/// Measured in characters, not bytes, so a multibyte character is kept or
/// dropped whole. A cap past the end of the string is a no-op.
pub fn truncate(value: &mut String, max_length: Option<usize>) {
    if let Some(max) = max_length {
        if let Some((cut, _)) = value.char_indices().nth(max) {
            value.truncate(cut);
        }
    }
}
