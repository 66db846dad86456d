//! Binding loggers to request-scoped contexts.
//!
//! Two carriers are offered:
//! - [`Context`], an explicit value passed along call chains
//! - a task-local scope ([`scope`] / [`current`]) for async request handlers
//!
//! Lookups never fail: without a bound logger they return
//! [`registry::default_logger`].

use std::fmt;
use std::future::Future;

use crate::logger::SharedLogger;
use crate::registry;

tokio::task_local! {
    static CURRENT: SharedLogger;
}

/// Immutable request context carrying an optional logger.
#[derive(Clone, Default)]
pub struct Context {
    logger: Option<SharedLogger>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logger(&self) -> Option<&SharedLogger> {
        self.logger.as_ref()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("logger", &self.logger.as_ref().and_then(|l| l.name()))
            .finish()
    }
}

/// Derive a context from `ctx` (or an empty one) with `logger` bound.
pub fn with_logger(ctx: Option<&Context>, logger: SharedLogger) -> Context {
    let mut next = ctx.cloned().unwrap_or_default();
    next.logger = Some(logger);
    next
}

/// The logger bound to `ctx`, or a fresh default logger if there is none.
pub fn from_context(ctx: Option<&Context>) -> SharedLogger {
    ctx.and_then(|c| c.logger.clone())
        .unwrap_or_else(registry::default_logger)
}

/// Run `f` with `logger` as the task's current logger.
pub async fn scope<F>(logger: SharedLogger, f: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(logger, f).await
}

/// The current task's logger, or a fresh default logger outside [`scope`].
pub fn current() -> SharedLogger {
    CURRENT
        .try_with(|logger| logger.clone())
        .unwrap_or_else(|_| registry::default_logger())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{logger_fn, with_name};
    use std::sync::Arc;

    fn named(name: &str) -> SharedLogger {
        with_name(logger_fn(|_| {}), name)
    }

    #[test]
    fn test_bind_and_lookup() {
        let ctx = with_logger(None, named("request"));
        assert_eq!(from_context(Some(&ctx)).name(), Some("request"));
    }

    #[test]
    fn test_binding_does_not_change_parent_context() {
        let parent = with_logger(None, named("parent"));
        let child = with_logger(Some(&parent), named("child"));

        assert_eq!(from_context(Some(&parent)).name(), Some("parent"));
        assert_eq!(from_context(Some(&child)).name(), Some("child"));
    }

    #[test]
    fn test_lookup_returns_bound_instance() {
        let logger = named("same");
        let ctx = with_logger(Some(&Context::new()), logger.clone());
        assert!(Arc::ptr_eq(&from_context(Some(&ctx)), &logger));
    }

    #[test]
    fn test_empty_context_falls_back() {
        assert!(Context::new().logger().is_none());
        // the default logger is unnamed
        assert_eq!(from_context(Some(&Context::new())).name(), None);
        assert_eq!(from_context(None).name(), None);
    }

    #[tokio::test]
    async fn test_task_local_scope() {
        let name = scope(named("task"), async { current().name().map(str::to_string) }).await;
        assert_eq!(name.as_deref(), Some("task"));
        assert_eq!(current().name(), None);
    }
}
