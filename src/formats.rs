//! Output formatters
//!
//! Two renderings share the compilation pipeline: [`LineFormatter`]
//! produces flat text lines from a format string, [`JsonFormatter`]
//! produces JSON documents from a structured template. Both compile once
//! and evaluate per record through the [`Formatter`] trait.

pub mod json;
pub mod line;

pub use json::JsonFormatter;
pub use line::LineFormatter;

use crate::record::Record;

/// Common interface over the output formatters.
pub trait Formatter: Send + Sync {
    /// Render one record to its final text form.
    fn format(&self, record: &dyn Record) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;
    use serde_json::json;

    #[test]
    fn test_formatters_unify_behind_the_trait() {
        let formatters: Vec<Box<dyn Formatter>> = vec![
            Box::new(LineFormatter::new("%PROTOCOL%", false).unwrap()),
            Box::new(JsonFormatter::new(&json!({"p": "%PROTOCOL%"}), false, false, false).unwrap()),
        ];
        let data = record(json!({"PROTOCOL": "HTTP/1.1"}));

        assert_eq!(formatters[0].format(&data), "HTTP/1.1");
        assert_eq!(formatters[1].format(&data), "{\"p\":\"HTTP/1.1\"}\n");
    }
}
