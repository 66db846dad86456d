//! End-to-end tests: inputs through decorators, classification, a renderer
//! and a sink. None of these touch the process-wide registry.

use std::sync::Arc;

use chrono::TimeZone;
use fieldlog_core::{
    classify, ecs, emit, with_fields, with_name, with_time, ConsoleLogger, Field, FieldValue,
    Format, LogConfig, Loggable, MemorySink, SharedLogger,
};

fn console(format: Format) -> (SharedLogger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger: SharedLogger = Arc::new(ConsoleLogger::with_format(format).with_sink(sink.clone()));
    (logger, sink)
}

fn connection_refused() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused")
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_classify_mixed_inputs() {
    let err = connection_refused();
    let fields = classify(fieldlog_core::loggables![
        "info",
        "opening connection",
        "http://x",
        Loggable::error(&err),
    ]);

    assert_eq!(
        fields,
        vec![
            Field::new("log.level", "info"),
            Field::new("message", "opening connection"),
            Field::new("url.path", "http://x"),
            Field::new("error.message", "connection refused"),
            Field::new("error.type", "std::io::error::Error"),
        ]
    );
}

#[test]
fn test_convention_fields_pass_through_classify() {
    let fields = vec![
        ecs::logger("app.db"),
        ecs::labels([("region", "eu")]),
        ecs::tags(["slow"]),
        ecs::server_address("db.internal"),
        ecs::server_port(5432),
        ecs::fatal(),
    ];
    let classified = classify(fields.iter().cloned().map(Loggable::from));
    assert_eq!(classified, fields);
}

#[test]
fn test_classify_time_and_lazy() {
    let time = chrono::Utc.with_ymd_and_hms(2020, 11, 20, 10, 54, 11).unwrap();
    let fields = classify(vec![
        Loggable::from(time),
        Loggable::lazy(|| ecs::server_domain("example.org")),
    ]);

    assert_eq!(fields[0], Field::new("@timestamp", "2020-11-20T10:54:11Z"));
    assert_eq!(fields[1], Field::new("server.domain", "example.org"));
}

// ============================================================================
// Rendering through a logger
// ============================================================================

#[test]
fn test_plain_pipeline() {
    let (root, sink) = console(Format::Plain);
    let logger = with_name(root, "api");

    emit!(logger, "info", "opening connection", "http://x", Loggable::error(&connection_refused()));

    assert_eq!(
        sink.take(),
        vec!["api info opening connection http://x connection refused std::io::error::Error"]
    );
}

#[test]
fn test_colored_pipeline() {
    let (root, sink) = console(Format::Colored);
    let logger = with_name(root, "api");

    emit!(logger, "warn", "retrying");

    assert_eq!(
        sink.take(),
        vec!["api \x1b[33mWARN\x1b[0m \x1b[33mretrying\x1b[0m"]
    );
}

#[test]
fn test_structured_pipeline() {
    let (root, sink) = console(Format::Structured);
    let logger = with_fields(
        with_name(with_name(root, "api"), "v1"),
        vec![ecs::server_port(8080)],
    );

    emit!(
        logger,
        ecs::error(),
        "bind failed",
        "retry later",
        Loggable::error(&connection_refused())
    );

    let lines = sink.take();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "server.port": 8080,
            "log.logger": "api.v1",
            "log.level": "error",
            "message": "bind failed retry later",
            "error.message": "connection refused",
            "error.type": "std::io::error::Error",
        })
    );
}

#[test]
fn test_error_string_is_not_a_level_token() {
    let (logger, sink) = console(Format::Structured);

    emit!(logger, "error", "bind failed");

    let json: serde_json::Value = serde_json::from_str(&sink.take()[0]).unwrap();
    assert_eq!(json, serde_json::json!({"message": "error bind failed"}));
}

#[test]
fn test_structured_fallback_on_unserializable_value() {
    let (logger, sink) = console(Format::Structured);

    emit!(logger, "info", Field::new("ratio", f64::NAN));

    let lines = sink.take();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("unable to marshal fields to json: "));
    assert!(lines[0].contains("ratio"));
}

#[test]
fn test_timed_structured_line_has_timestamp() {
    let (root, sink) = console(Format::Structured);
    let logger = with_time(root);

    emit!(logger, "debug", "tick");

    let json: serde_json::Value = serde_json::from_str(&sink.take()[0]).unwrap();
    let stamp = json["@timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    assert_eq!(json["log.level"], "debug");
}

#[test]
fn test_nested_values_render() {
    let (logger, sink) = console(Format::Plain);
    let mut inner = std::collections::BTreeMap::new();
    inner.insert("b".to_string(), FieldValue::from(vec![1i64, 2]));

    emit!(logger, Field::new("a", inner), Field::new("none", FieldValue::Nil));

    assert_eq!(sink.take(), vec!["map[b:[1 2]] <nil>"]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_builds_full_chain() {
    let sink = Arc::new(MemorySink::new());
    let logger = LogConfig::new()
        .with_format(Format::Plain)
        .with_name("worker")
        .with_field(ecs::tags(["batch"]))
        .with_sink(sink.clone())
        .build();

    emit!(logger, "info", "done");

    assert_eq!(logger_name(&logger), Some("worker".to_string()));
    assert_eq!(sink.take(), vec!["worker [batch] info done"]);
}

#[test]
fn test_config_from_env_vars() {
    let config = LogConfig::from_env_in([
        ("APP_ENV", "staging"),
        ("FIELDLOG_TIMESTAMPS", "1"),
    ]);
    // no override: the logger follows the process-wide default
    assert_eq!(config.format(), None);
    assert!(config.timestamps());

    let config = LogConfig::from_env_in([
        ("APP_ENV", "staging"),
        ("FIELDLOG_FORMAT", "json"),
    ]);
    assert_eq!(config.format(), Some(Format::Structured));
    assert!(!config.timestamps());
}

fn logger_name(logger: &SharedLogger) -> Option<String> {
    use fieldlog_core::Logger as _;
    logger.name().map(str::to_string)
}
