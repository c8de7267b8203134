//! End-to-end tests for structured and JSON output

use logline::{Formatter, JsonFormatter, StructFormatter};
use serde_json::{json, Map, Value};

fn record(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

fn data() -> Map<String, Value> {
    record(json!({
        "PROTOCOL": "HTTP/2",
        "RESPONSE_CODE": 204,
        "DURATION": 7,
        "REQ": { ":METHOD": "POST", ":PATH": "/ingest" },
    }))
}

fn template() -> Value {
    json!({
        "time": "%START_TIME%",
        "request": {
            "method": "%REQ(:METHOD)%",
            "path": "%REQ(:PATH)%",
        },
        "code": "%RESPONSE_CODE%",
        "line": "%REQ(:METHOD)% %REQ(:PATH)%",
    })
}

#[test]
fn test_structured_output_mirrors_template_shape() {
    let formatter = StructFormatter::new(&template(), false, false).unwrap();
    let output = formatter.format(&data());
    assert_eq!(
        output,
        json!({
            "time": "-",
            "request": { "method": "POST", "path": "/ingest" },
            "code": "204",
            "line": "POST /ingest",
        })
    );
}

#[test]
fn test_declared_order_is_stable_across_records() {
    let formatter = JsonFormatter::new(&template(), false, false, false).unwrap();
    let first = formatter.format(&data());
    insta::assert_snapshot!(
        first.trim_end(),
        @r#"{"time":"-","request":{"method":"POST","path":"/ingest"},"code":"204","line":"POST /ingest"}"#
    );
    // Different record, same key order.
    let other = record(json!({"RESPONSE_CODE": 500, "REQ": {":METHOD": "GET", ":PATH": "/"}}));
    insta::assert_snapshot!(
        formatter.format(&other).trim_end(),
        @r#"{"time":"-","request":{"method":"GET","path":"/"},"code":"500","line":"GET /"}"#
    );
}

#[test]
fn test_json_document_ends_with_exactly_one_newline() {
    let formatter = JsonFormatter::new(&template(), false, false, false).unwrap();
    let line = formatter.format(&data());
    assert!(line.ends_with('\n'));
    assert!(!line.ends_with("\n\n"));
    assert_eq!(line.matches('\n').count(), 1);
}

#[test]
fn test_sorted_keys_change_serialization_only() {
    let formatter = JsonFormatter::new(&template(), false, false, true).unwrap();
    insta::assert_snapshot!(
        formatter.format(&data()).trim_end(),
        @r#"{"code":"204","line":"POST /ingest","request":{"method":"POST","path":"/ingest"},"time":"-"}"#
    );
}

#[test]
fn test_preserve_types_keeps_numbers_in_documents() {
    let template = json!({"code": "%RESPONSE_CODE%", "took_ms": "%DURATION%", "proto": "%PROTOCOL%"});
    let formatter = JsonFormatter::new(&template, true, false, false).unwrap();
    assert_eq!(
        formatter.format(&data()),
        "{\"code\":204,\"took_ms\":7,\"proto\":\"HTTP/2\"}\n"
    );
}

#[test]
fn test_preserve_types_keeps_nested_field_values() {
    let template = json!({"req": "%REQ%"});
    let formatter = StructFormatter::new(&template, true, false).unwrap();
    let output = formatter.format(&data());
    assert_eq!(output["req"], json!({":METHOD": "POST", ":PATH": "/ingest"}));
}

#[test]
fn test_omit_empty_prunes_and_cascades() {
    let template = json!({
        "present": "%PROTOCOL%",
        "absent": "%UPSTREAM_HOST%",
        "upstream": {
            "host": "%UPSTREAM_HOST%",
            "cluster": "%UPSTREAM_CLUSTER%",
        },
    });
    let formatter = JsonFormatter::new(&template, false, true, false).unwrap();
    assert_eq!(formatter.format(&data()), "{\"present\":\"HTTP/2\"}\n");
}

#[test]
fn test_omit_empty_never_prunes_lists() {
    let template = json!({"hops": ["%UPSTREAM_HOST%", "%UPSTREAM_CLUSTER%"]});
    let formatter = JsonFormatter::new(&template, false, true, false).unwrap();
    assert_eq!(formatter.format(&data()), "{\"hops\":[]}\n");
}

#[test]
fn test_omit_empty_everything_pruned_yields_empty_document() {
    let template = json!({"a": "%MISSING_A%", "b": {"c": "%MISSING_C%"}});
    let formatter = JsonFormatter::new(&template, false, true, false).unwrap();
    assert_eq!(formatter.format(&data()), "{}\n");
}

#[test]
fn test_without_omit_empty_absent_values_render_markers() {
    let template = json!({"host": "%UPSTREAM_HOST%", "pair": "%UPSTREAM_HOST%:%UPSTREAM_PORT%"});
    let formatter = StructFormatter::new(&template, false, false).unwrap();
    let output = formatter.format(&data());
    assert_eq!(output["host"], json!("-"));
    assert_eq!(output["pair"], json!("-:-"));
}

#[test]
fn test_template_rejects_booleans_anywhere() {
    let template = json!({"nested": {"deep": [true]}});
    assert!(JsonFormatter::new(&template, false, false, false).is_err());
}

#[test]
fn test_template_leaf_grammar_errors_carry_position() {
    let template = json!({"bad": "value %NOPE"});
    let error = JsonFormatter::new(&template, false, false, false).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Incorrect format: value %NOPE. Couldn't find valid command at position 6"
    );
}
