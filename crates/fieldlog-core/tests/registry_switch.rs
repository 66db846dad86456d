//! Process-wide registry tests
//!
//! These tests mutate the global factory and default renderer, so each one
//! holds GLOBAL_LOCK for its whole duration.

use std::sync::Arc;

use fieldlog_core::{
    ecs, emit, registry, with_name, ConsoleLogger, Field, Format, Logger, MemorySink, Plain,
    SharedLogger, Structured,
};
use parking_lot::Mutex;

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

fn console(sink: &Arc<MemorySink>) -> ConsoleLogger {
    ConsoleLogger::new().with_sink(sink.clone())
}

// ============================================================================
// Default renderer resolution
// ============================================================================

#[test]
fn test_switching_default_renderer_affects_existing_loggers() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = Arc::new(MemorySink::new());
    let logger: SharedLogger = with_name(Arc::new(console(&sink)), "svc");

    registry::set_default_renderer(Arc::new(Plain));
    emit!(logger, "info", "first");

    registry::set_default_renderer(Arc::new(Structured));
    emit!(logger, "info", "second");

    assert_eq!(
        sink.take(),
        vec![
            "svc info first".to_string(),
            r#"{"log.level":"info","log.logger":"svc","message":"second"}"#.to_string(),
        ]
    );
    registry::reset_default_renderer();
}

#[test]
fn test_switching_default_renderer_leaves_fixed_renderer_alone() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = Arc::new(MemorySink::new());
    let frozen = ConsoleLogger::with_format(Format::Plain).with_sink(sink.clone());

    registry::set_default_format(Format::Structured);
    emit!(frozen, "debug", "still plain");

    assert_eq!(sink.take(), vec!["debug still plain"]);
    registry::reset_default_renderer();
}

#[test]
fn test_custom_default_renderer() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = Arc::new(MemorySink::new());
    let logger = console(&sink);

    registry::set_default_renderer(Arc::new(|fields: &[Field]| {
        fields
            .iter()
            .map(|f| f.key().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }));
    emit!(logger, "warn", "disk", "http://host/metrics");

    assert_eq!(sink.take(), vec!["log.level,message,url.path"]);
    registry::reset_default_renderer();
}

// ============================================================================
// Factory
// ============================================================================

#[test]
fn test_replaced_factory_is_used_by_new_logger() {
    let _guard = GLOBAL_LOCK.lock();
    let sink = Arc::new(MemorySink::new());
    let factory_sink = sink.clone();

    registry::set_factory(move |parent: Option<SharedLogger>, name: &str, fields: Vec<Field>| {
        let base = parent.unwrap_or_else(|| {
            Arc::new(ConsoleLogger::with_format(Format::Plain).with_sink(factory_sink.clone()))
        });
        let mut fields = fields;
        fields.push(ecs::labels([("factory", "custom")]));
        fieldlog_core::with_fields(with_name(base, name), fields)
    });

    let logger = registry::new_logger("jobs", Vec::new());
    emit!(logger, "info", "tick");
    assert_eq!(sink.take(), vec!["map[factory:custom] jobs info tick"]);

    registry::reset_factory();
    let logger = registry::new_logger("jobs", Vec::new());
    assert_eq!(logger.name(), Some("jobs"));
}

#[test]
fn test_child_logger_joins_names() {
    let _guard = GLOBAL_LOCK.lock();
    registry::reset_factory();

    let parent = registry::new_logger("app", Vec::new());
    let child = registry::child_logger(Some(parent), "http", vec![ecs::server_port(80)]);
    let grandchild = registry::child_logger(Some(child), "router", Vec::new());

    assert_eq!(grandchild.name(), Some("app.http.router"));
}

#[test]
fn test_default_logger_is_unnamed() {
    let _guard = GLOBAL_LOCK.lock();
    registry::reset_factory();
    assert_eq!(registry::default_logger().name(), None);
}

#[test]
fn test_set_factory_last_write_wins() {
    let _guard = GLOBAL_LOCK.lock();

    registry::set_factory(|_, _, _| with_name(fieldlog_core::logger_fn(|_| {}), "first"));
    registry::set_factory(|_, _, _| with_name(fieldlog_core::logger_fn(|_| {}), "second"));
    assert_eq!(registry::new_logger("ignored", Vec::new()).name(), Some("second"));

    registry::reset_factory();
}
