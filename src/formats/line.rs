//! Flat text output

use crate::error::FormatError;
use crate::formats::Formatter;
use crate::parser::parse_with_resolvers;
use crate::provider::{Provider, DEFAULT_EMPTY_VALUE};
use crate::record::Record;
use crate::resolver::CommandResolver;

/// Renders records as flat text lines.
///
/// Compiles the format string once; each call concatenates provider output
/// in segment order. Providers whose value is absent for a record render
/// as `-`, or as nothing in omit-empty mode. An available but empty string
/// renders as itself either way.
#[derive(Debug)]
pub struct LineFormatter {
    providers: Vec<Provider>,
    empty_value: &'static str,
}

impl LineFormatter {
    pub fn new(format: &str, omit_empty: bool) -> Result<Self, FormatError> {
        Self::with_resolvers(format, omit_empty, &[])
    }

    pub fn with_resolvers(
        format: &str,
        omit_empty: bool,
        resolvers: &[Box<dyn CommandResolver>],
    ) -> Result<Self, FormatError> {
        Ok(LineFormatter {
            providers: parse_with_resolvers(format, resolvers)?,
            empty_value: if omit_empty { "" } else { DEFAULT_EMPTY_VALUE },
        })
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &dyn Record) -> String {
        let mut line = String::with_capacity(256);
        for provider in &self.providers {
            match provider.format(record) {
                Some(piece) => line.push_str(&piece),
                None => line.push_str(self.empty_value),
            }
        }
        line
    }
}
