//! Structured templates
//!
//! A structured template is a JSON-like tree whose string leaves are
//! format strings and whose shape carries over to the output: maps stay
//! maps, lists stay lists, numbers become constant leaves.
//! [`StructFormatter`] compiles the tree once, binding every leaf through
//! the resolution chain, and then evaluates it per record into a value
//! tree. Map entries evaluate in declared order.
//!
//! Two policies shape the output. Omit-empty drops absent values instead
//! of rendering placeholder markers: a map that loses every entry
//! collapses to an absent value itself so pruning cascades upward, while
//! an emptied list stays as an empty list. Type preservation keeps the
//! typed form of single-command leaves (`"%CODE%"` can stay a number);
//! leaves that mix several pieces always concatenate to a string.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::parser::parse_with_resolvers;
use crate::provider::{Provider, DEFAULT_EMPTY_VALUE};
use crate::record::Record;
use crate::resolver::CommandResolver;

/// One compiled node of a structured template.
#[derive(Debug)]
pub enum TemplateNode {
    /// A compiled format string or numeric constant.
    Leaf(Vec<Provider>),
    /// Nested map, in declared entry order.
    Map(IndexMap<String, TemplateNode>),
    /// Nested list.
    List(Vec<TemplateNode>),
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

fn compile_node(
    value: &Value,
    resolvers: &[Box<dyn CommandResolver>],
) -> Result<TemplateNode, FormatError> {
    match value {
        Value::String(format) => Ok(TemplateNode::Leaf(parse_with_resolvers(format, resolvers)?)),
        Value::Number(number) => Ok(TemplateNode::Leaf(vec![Provider::Number(number.clone())])),
        Value::Object(map) => Ok(TemplateNode::Map(compile_map(map, resolvers)?)),
        Value::Array(list) => {
            let mut nodes = Vec::with_capacity(list.len());
            for element in list {
                nodes.push(compile_node(element, resolvers)?);
            }
            Ok(TemplateNode::List(nodes))
        }
        other => Err(FormatError::UnsupportedKind {
            kind: kind_name(other),
        }),
    }
}

fn compile_map(
    map: &Map<String, Value>,
    resolvers: &[Box<dyn CommandResolver>],
) -> Result<IndexMap<String, TemplateNode>, FormatError> {
    let mut compiled = IndexMap::with_capacity(map.len());
    for (key, value) in map {
        compiled.insert(key.clone(), compile_node(value, resolvers)?);
    }
    Ok(compiled)
}

/// Formatter for structured output.
///
/// Compiles a map-rooted template once; [`StructFormatter::format`] then
/// evaluates it against each record.
#[derive(Debug)]
pub struct StructFormatter {
    root: IndexMap<String, TemplateNode>,
    omit_empty: bool,
    preserve_types: bool,
    empty_value: String,
}

impl StructFormatter {
    /// Compile `template`, which must be a map at the root.
    pub fn new(template: &Value, preserve_types: bool, omit_empty: bool) -> Result<Self, FormatError> {
        Self::with_resolvers(template, preserve_types, omit_empty, &[])
    }

    pub fn with_resolvers(
        template: &Value,
        preserve_types: bool,
        omit_empty: bool,
        resolvers: &[Box<dyn CommandResolver>],
    ) -> Result<Self, FormatError> {
        let map = template.as_object().ok_or(FormatError::UnsupportedKind {
            kind: kind_name(template),
        })?;
        Ok(StructFormatter {
            root: compile_map(map, resolvers)?,
            omit_empty,
            preserve_types,
            empty_value: if omit_empty {
                String::new()
            } else {
                DEFAULT_EMPTY_VALUE.to_string()
            },
        })
    }

    /// Evaluate the template against one record.
    ///
    /// The result is always a map at the root, even when omit-empty prunes
    /// every entry.
    pub fn format(&self, record: &dyn Record) -> Value {
        match self.evaluate_map(&self.root, record) {
            Value::Null => Value::Object(Map::new()),
            value => value,
        }
    }

    fn evaluate(&self, node: &TemplateNode, record: &dyn Record) -> Value {
        match node {
            TemplateNode::Leaf(providers) => self.evaluate_leaf(providers, record),
            TemplateNode::Map(entries) => self.evaluate_map(entries, record),
            TemplateNode::List(elements) => self.evaluate_list(elements, record),
        }
    }

    fn evaluate_leaf(&self, providers: &[Provider], record: &dyn Record) -> Value {
        if let [provider] = providers {
            if self.preserve_types {
                return provider.format_value(record);
            }
            return match provider.format(record) {
                Some(text) => Value::String(text),
                None if self.omit_empty => Value::Null,
                None => Value::String(self.empty_value.clone()),
            };
        }

        // Multi-piece leaves concatenate to a string no matter what.
        let mut text = String::new();
        for provider in providers {
            match provider.format(record) {
                Some(piece) => text.push_str(&piece),
                None => text.push_str(&self.empty_value),
            }
        }
        Value::String(text)
    }

    fn evaluate_map(&self, entries: &IndexMap<String, TemplateNode>, record: &dyn Record) -> Value {
        let mut output = Map::new();
        for (key, node) in entries {
            let value = self.evaluate(node, record);
            if self.omit_empty && value.is_null() {
                continue;
            }
            output.insert(key.clone(), value);
        }
        if self.omit_empty && output.is_empty() {
            return Value::Null;
        }
        Value::Object(output)
    }

    fn evaluate_list(&self, elements: &[TemplateNode], record: &dyn Record) -> Value {
        let mut output = Vec::new();
        for node in elements {
            let value = self.evaluate(node, record);
            if self.omit_empty && value.is_null() {
                continue;
            }
            output.push(value);
        }
        Value::Array(output)
    }
}
