//! Command-line interface for logline
//! This binary compiles format strings and renders JSON record files through them.
//!
//! Usage:
//!   logline check `<format>` [--dump]                         - Validate a format string
//!   logline render `<records>` --format `<format>`            - Render records as text lines
//!   logline json `<records>` --template `<template>`          - Render records as JSON documents

use clap::{Arg, ArgAction, Command};
use serde_json::{Map, Value};

use logline::{scan, Formatter, JsonFormatter, LineFormatter};

fn main() {
    let matches = Command::new("logline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for compiling substitution formats and rendering telemetry records")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Validate a format string")
                .arg(
                    Arg::new("format")
                        .help("The format string to validate")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("dump")
                        .long("dump")
                        .help("Print the parsed segments as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render records as flat text lines")
                .arg(
                    Arg::new("records")
                        .help("Path to a JSON file holding a record object or an array of them")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("The format string to render with")
                        .required(true),
                )
                .arg(
                    Arg::new("omit-empty")
                        .long("omit-empty")
                        .help("Render absent values as nothing instead of '-'")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("json")
                .about("Render records as JSON documents")
                .arg(
                    Arg::new("records")
                        .help("Path to a JSON file holding a record object or an array of them")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .short('t')
                        .help("Path to the structured template (JSON, or YAML by extension)")
                        .required(true),
                )
                .arg(
                    Arg::new("omit-empty")
                        .long("omit-empty")
                        .help("Drop absent values instead of rendering markers")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("preserve-types")
                        .long("preserve-types")
                        .help("Keep typed values for single-command leaves")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("sort-keys")
                        .long("sort-keys")
                        .help("Serialize map keys in sorted order")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", check_matches)) => {
            let format = check_matches.get_one::<String>("format").unwrap();
            handle_check_command(format, check_matches.get_flag("dump"));
        }
        Some(("render", render_matches)) => {
            let records = render_matches.get_one::<String>("records").unwrap();
            let format = render_matches.get_one::<String>("format").unwrap();
            handle_render_command(records, format, render_matches.get_flag("omit-empty"));
        }
        Some(("json", json_matches)) => {
            let records = json_matches.get_one::<String>("records").unwrap();
            let template = json_matches.get_one::<String>("template").unwrap();
            handle_json_command(
                records,
                template,
                json_matches.get_flag("omit-empty"),
                json_matches.get_flag("preserve-types"),
                json_matches.get_flag("sort-keys"),
            );
        }
        _ => unreachable!(),
    }
}

/// Handle the check command
fn handle_check_command(format: &str, dump: bool) {
    let segments = scan(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if dump {
        let rendered = serde_json::to_string_pretty(&segments).unwrap_or_else(|e| {
            eprintln!("Serialization error: {}", e);
            std::process::exit(1);
        });
        println!("{}", rendered);
    } else {
        println!("ok: {} segment(s)", segments.len());
    }
}

/// Handle the render command
fn handle_render_command(records_path: &str, format: &str, omit_empty: bool) {
    let formatter = LineFormatter::new(format, omit_empty).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    for record in load_records(records_path) {
        println!("{}", formatter.format(&record));
    }
}

/// Handle the json command
fn handle_json_command(
    records_path: &str,
    template_path: &str,
    omit_empty: bool,
    preserve_types: bool,
    sort_keys: bool,
) {
    let template = load_template(template_path);
    let formatter = JsonFormatter::new(&template, preserve_types, omit_empty, sort_keys)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    for record in load_records(records_path) {
        // JSON output already carries its newline.
        print!("{}", formatter.format(&record));
    }
}

/// Load records from a JSON file: either one object or an array of objects.
fn load_records(path: &str) -> Vec<Map<String, Value>> {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading records file: {}", e);
        std::process::exit(1);
    });
    let value: Value = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Error parsing records file: {}", e);
        std::process::exit(1);
    });

    let entries = match value {
        Value::Array(entries) => entries,
        single => vec![single],
    };
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(record) => record,
            other => {
                eprintln!("Error: records must be objects, got: {}", other);
                std::process::exit(1);
            }
        })
        .collect()
}

/// Load a structured template, picking the parser by file extension.
fn load_template(path: &str) -> Value {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading template file: {}", e);
        std::process::exit(1);
    });

    let parsed = if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&source).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&source).map_err(|e| e.to_string())
    };

    parsed.unwrap_or_else(|e| {
        eprintln!("Error parsing template file: {}", e);
        std::process::exit(1);
    })
}
