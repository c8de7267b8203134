//! Command resolution
//!
//! Binding a parsed command to a provider walks a three-stage chain:
//! process-wide built-ins first, then the resolvers supplied for the one
//! compilation, then a fallback that defers the lookup to the record at
//! evaluation time. Built-ins outrank caller-supplied resolvers so an
//! extension cannot shadow a core command. The fallback accepts every
//! syntactically valid command, which is why resolution itself never
//! fails; a name nothing recognizes simply evaluates to an absent value
//! on records that do not carry it.

pub mod factory;

use std::sync::OnceLock;

use serde_json::Value;

use crate::command::Command;
use crate::provider::{truncate, CommandProvider, Provider};
use crate::record::{value_to_text, Record};

/// A strategy turning parsed commands into providers.
///
/// Implementations return `None` for commands they do not recognize so the
/// chain can continue past them. Returning a provider claims the command.
pub trait CommandResolver: Send + Sync {
    fn resolve(&self, command: &Command) -> Option<Provider>;
}

static BUILT_INS: OnceLock<Vec<Box<dyn CommandResolver>>> = OnceLock::new();

/// Install the process-wide built-in resolvers.
///
/// Takes effect at most once; the installed set is read-only afterwards
/// and consulted before caller-supplied resolvers by every compilation.
/// A second call leaves the first set in place and hands the rejected
/// resolvers back.
pub fn install_built_ins(
    resolvers: Vec<Box<dyn CommandResolver>>,
) -> Result<(), Vec<Box<dyn CommandResolver>>> {
    BUILT_INS.set(resolvers)
}

fn built_ins() -> &'static [Box<dyn CommandResolver>] {
    BUILT_INS.get().map(Vec::as_slice).unwrap_or(&[])
}

/// Resolve `command` through the chain: built-ins, then `resolvers` in the
/// order supplied, then the record-lookup fallback.
pub fn resolve_command(command: &Command, resolvers: &[Box<dyn CommandResolver>]) -> Provider {
    resolve_chain(built_ins(), resolvers, command)
}

fn resolve_chain(
    built_ins: &[Box<dyn CommandResolver>],
    resolvers: &[Box<dyn CommandResolver>],
    command: &Command,
) -> Provider {
    for resolver in built_ins.iter().chain(resolvers) {
        if let Some(provider) = resolver.resolve(command) {
            return provider;
        }
    }
    Provider::Command(Box::new(FieldProvider::new(command)))
}

/// Fallback provider: looks the command's field up on the record at
/// evaluation time.
#[derive(Debug)]
pub struct FieldProvider {
    name: String,
    subcommand: Option<String>,
    max_length: Option<usize>,
}

impl FieldProvider {
    pub fn new(command: &Command) -> Self {
        FieldProvider {
            name: command.name.clone(),
            subcommand: command.subcommand.clone(),
            max_length: command.max_length,
        }
    }
}

impl CommandProvider for FieldProvider {
    fn format(&self, record: &dyn Record) -> Option<String> {
        let value = record.field(&self.name, self.subcommand.as_deref())?;
        let mut text = value_to_text(&value)?;
        truncate(&mut text, self.max_length);
        Some(text)
    }

    /// Typed lookup keeps the field's own kind; the length cap only
    /// applies to string values.
    fn format_value(&self, record: &dyn Record) -> Value {
        match record.field(&self.name, self.subcommand.as_deref()) {
            Some(Value::String(mut text)) => {
                truncate(&mut text, self.max_length);
                Value::String(text)
            }
            Some(value) => value,
            None => Value::Null,
        }
    }
}
