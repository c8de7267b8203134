//! JSON output

use serde_json::{Map, Value};

use crate::error::FormatError;
use crate::formats::Formatter;
use crate::record::Record;
use crate::resolver::CommandResolver;
use crate::template::StructFormatter;

/// Renders records as single-line JSON documents.
///
/// A thin wrapper over [`StructFormatter`]: evaluates the template, then
/// serializes compactly with exactly one trailing newline so output
/// streams straight into line-oriented log pipelines. Key sorting is a
/// serialization concern only; declared order still drives evaluation and
/// omit-empty pruning.
#[derive(Debug)]
pub struct JsonFormatter {
    template: StructFormatter,
    sort_keys: bool,
}

impl JsonFormatter {
    pub fn new(
        template: &Value,
        preserve_types: bool,
        omit_empty: bool,
        sort_keys: bool,
    ) -> Result<Self, FormatError> {
        Self::with_resolvers(template, preserve_types, omit_empty, sort_keys, &[])
    }

    pub fn with_resolvers(
        template: &Value,
        preserve_types: bool,
        omit_empty: bool,
        sort_keys: bool,
        resolvers: &[Box<dyn CommandResolver>],
    ) -> Result<Self, FormatError> {
        Ok(JsonFormatter {
            template: StructFormatter::with_resolvers(template, preserve_types, omit_empty, resolvers)?,
            sort_keys,
        })
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &dyn Record) -> String {
        let output = self.template.format(record);
        let output = if self.sort_keys { sorted(output) } else { output };
        let mut line = match serde_json::to_string(&output) {
            Ok(text) => text,
            Err(error) => error.to_string(),
        };
        line.push('\n');
        line
    }
}

/// Rebuild a value with all map keys in lexicographic order, recursively.
fn sorted(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, value)| (key, sorted(value)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect::<Map<String, Value>>())
        }
        Value::Array(list) => Value::Array(list.into_iter().map(sorted).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use serde_json::json;

    fn data() -> serde_json::Map<String, Value> {
        record(json!({"PROTOCOL": "HTTP/1.1", "RESPONSE_CODE": 200}))
    }

    #[test]
    fn test_output_is_one_line_with_trailing_newline() {
        let template = json!({"protocol": "%PROTOCOL%"});
        let formatter = JsonFormatter::new(&template, false, false, false).unwrap();
        let line = formatter.format(&data());
        assert_eq!(line, "{\"protocol\":\"HTTP/1.1\"}\n");
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_declared_key_order_by_default() {
        let template = json!({"zz": "%PROTOCOL%", "aa": "%RESPONSE_CODE%"});
        let formatter = JsonFormatter::new(&template, false, false, false).unwrap();
        let line = formatter.format(&data());
        insta::assert_snapshot!(line.trim_end(), @r#"{"zz":"HTTP/1.1","aa":"200"}"#);
    }

    #[test]
    fn test_sort_keys_orders_lexicographically() {
        let template = json!({"zz": "%PROTOCOL%", "aa": "%RESPONSE_CODE%"});
        let formatter = JsonFormatter::new(&template, false, false, true).unwrap();
        let line = formatter.format(&data());
        insta::assert_snapshot!(line.trim_end(), @r#"{"aa":"200","zz":"HTTP/1.1"}"#);
    }

    #[test]
    fn test_sort_keys_recurses_into_nested_values() {
        let template = json!({
            "b": { "y": "1", "x": "2" },
            "a": [ { "n": "3", "m": "4" } ],
        });
        let formatter = JsonFormatter::new(&template, false, false, true).unwrap();
        let line = formatter.format(&data());
        insta::assert_snapshot!(
            line.trim_end(),
            @r#"{"a":[{"m":"4","n":"3"}],"b":{"x":"2","y":"1"}}"#
        );
    }

    #[test]
    fn test_sort_keys_does_not_change_pruning() {
        let template = json!({"zz": "%PROTOCOL%", "aa": "%UPSTREAM_HOST%"});
        let sorted = JsonFormatter::new(&template, false, true, true).unwrap();
        let unsorted = JsonFormatter::new(&template, false, true, false).unwrap();
        assert_eq!(sorted.format(&data()), unsorted.format(&data()));
    }

    #[test]
    fn test_fully_pruned_output_is_empty_document() {
        let template = json!({"gone": "%UPSTREAM_HOST%"});
        let formatter = JsonFormatter::new(&template, false, true, false).unwrap();
        assert_eq!(formatter.format(&data()), "{}\n");
    }

    #[test]
    fn test_preserve_types_reaches_the_document() {
        let template = json!({"code": "%RESPONSE_CODE%"});
        let formatter = JsonFormatter::new(&template, true, false, false).unwrap();
        assert_eq!(formatter.format(&data()), "{\"code\":200}\n");
    }

    #[test]
    fn test_debug_output_carries_the_sort_flag() {
        let template = json!({"p": "%PROTOCOL%"});
        let formatter = JsonFormatter::new(&template, false, false, true).unwrap();
        let dump = format!("{:?}", formatter);
        assert!(dump.contains("JsonFormatter"));
        assert!(dump.contains("sort_keys: true"));
    }
}
