//! Evaluation context contract
//!
//! A [`Record`] is the data a formatter reads when it renders one log
//! entry. The engine itself is agnostic about where the data comes from;
//! anything that can answer field lookups by command name works. A JSON
//! object is the ready-made implementation: top-level keys are command
//! names, and a subcommand indexes one level into a nested object, so
//! `%REQ(:AUTHORITY)%` reads `record["REQ"][":AUTHORITY"]`.

use serde_json::{Map, Value};

/// Per-entry data handed to every evaluation call.
///
/// Lookups that find nothing return `None`; the formatters render that per
/// their empty-value policy. Absence is never an error.
pub trait Record {
    /// Look up the field for `name`, optionally narrowed by `subcommand`.
    fn field(&self, name: &str, subcommand: Option<&str>) -> Option<Value>;
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str, subcommand: Option<&str>) -> Option<Value> {
        let value = self.get(name)?;
        match subcommand {
            None => Some(value.clone()),
            Some(key) => value.as_object()?.get(key).cloned(),
        }
    }
}

/// Convert a field value to its flat text form.
///
/// Strings pass through unquoted, null means the value is absent, and
/// anything else serializes to compact JSON.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => serde_json::to_string(other).ok(),
    }
}
