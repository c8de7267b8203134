//! Shared helpers for the unit tests

use serde_json::{Map, Value};

use crate::command::Command;
use crate::provider::{CommandProvider, Provider};
use crate::record::Record;
use crate::resolver::CommandResolver;

/// Build a record from a JSON object literal.
pub(crate) fn record(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Resolver claiming exactly one command name with a fixed output.
pub(crate) struct StaticResolver {
    name: String,
    output: String,
}

impl StaticResolver {
    pub(crate) fn new(name: impl Into<String>, output: impl Into<String>) -> Self {
        StaticResolver {
            name: name.into(),
            output: output.into(),
        }
    }
}

impl CommandResolver for StaticResolver {
    fn resolve(&self, command: &Command) -> Option<Provider> {
        if command.name == self.name {
            Some(Provider::Command(Box::new(StaticProvider {
                output: self.output.clone(),
            })))
        } else {
            None
        }
    }
}

/// Provider returning a fixed string for every record.
pub(crate) struct StaticProvider {
    pub(crate) output: String,
}

impl CommandProvider for StaticProvider {
    fn format(&self, _record: &dyn Record) -> Option<String> {
        Some(self.output.clone())
    }
}
