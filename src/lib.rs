//! # logline
//!
//! A substitution format engine for access-log style telemetry records.
//!
//! A format string mixes literal text with `%COMMAND%` tokens:
//!
//! ```text
//! [%START_TIME%] "%REQ(:METHOD)% %REQ(:PATH)%" %RESPONSE_CODE% %DURATION%
//! ```
//!
//! [`parse`] compiles such a string once into a provider sequence;
//! [`LineFormatter`] renders records through it as flat text. Structured
//! templates, JSON-like trees whose string leaves are format strings, go
//! through [`StructFormatter`] and [`JsonFormatter`] instead and keep
//! their shape in the output.
//!
//! Commands resolve through a chain: process-wide built-ins (see
//! [`install_built_ins`]), then resolvers supplied per formatter, then a
//! fallback that looks fields up on the record itself. Compilation fails
//! loudly on grammar errors; evaluation never fails, a missing field is
//! just an absent value.

pub mod command;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod provider;
pub mod record;
pub mod resolver;
pub mod template;

#[cfg(test)]
pub(crate) mod testing;

pub use command::{split_subcommand, Command};
pub use error::FormatError;
pub use formats::{Formatter, JsonFormatter, LineFormatter};
pub use parser::{parse, parse_with_resolvers, scan, Segment};
pub use provider::{truncate, CommandProvider, Provider, DEFAULT_EMPTY_VALUE};
pub use record::{value_to_text, Record};
pub use resolver::factory::{FactoryRegistry, ResolverFactory};
pub use resolver::{install_built_ins, resolve_command, CommandResolver, FieldProvider};
pub use template::{StructFormatter, TemplateNode};
