//! Process-wide logger factory and default renderer.
//!
//! Both slots are initialized lazily on first use: the renderer from
//! [`env::default_format`], the factory with [`default_factory`]. Setters
//! can replace either at any time; the last value set wins.
//!
//! Loggers created with [`ConsoleLogger::new`] (including everything the
//! default factory builds) look the renderer up on every emit, so replacing
//! it affects them immediately. Loggers built with a fixed renderer are not
//! affected.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::env;
use crate::field::Field;
use crate::logger::{with_fields, with_name, ConsoleLogger, SharedLogger};
use crate::render::{Format, SharedRender};

/// Builds a logger from an optional parent, a name and fixed fields.
pub type Factory = Arc<dyn Fn(Option<SharedLogger>, &str, Vec<Field>) -> SharedLogger + Send + Sync>;

struct Slots {
    renderer: SharedRender,
    factory: Factory,
}

static SLOTS: OnceLock<RwLock<Slots>> = OnceLock::new();

fn slots() -> &'static RwLock<Slots> {
    SLOTS.get_or_init(|| {
        RwLock::new(Slots {
            renderer: env::default_format().renderer(),
            factory: Arc::new(default_factory),
        })
    })
}

/// The factory installed at start-up.
///
/// Wraps `parent` (or a fresh [`ConsoleLogger`] following the default
/// renderer) with `fields`, then names it. A named parent yields a
/// dot-joined name like `parent.child`.
pub fn default_factory(parent: Option<SharedLogger>, name: &str, fields: Vec<Field>) -> SharedLogger {
    let base = parent.unwrap_or_else(|| Arc::new(ConsoleLogger::new()));
    with_name(with_fields(base, fields), name)
}

/// Current default renderer.
pub fn default_renderer() -> SharedRender {
    slots().read().renderer.clone()
}

pub fn set_default_renderer(renderer: SharedRender) {
    slots().write().renderer = renderer;
}

pub fn set_default_format(format: Format) {
    set_default_renderer(format.renderer());
}

/// Re-evaluate the environment and install the renderer it selects.
pub fn reset_default_renderer() -> Format {
    let format = env::default_format();
    set_default_format(format);
    format
}

pub fn set_factory<F>(factory: F)
where
    F: Fn(Option<SharedLogger>, &str, Vec<Field>) -> SharedLogger + Send + Sync + 'static,
{
    slots().write().factory = Arc::new(factory);
}

/// Put [`default_factory`] back.
pub fn reset_factory() {
    set_factory(default_factory);
}

/// Create a root logger through the current factory.
pub fn new_logger(name: &str, fields: Vec<Field>) -> SharedLogger {
    child_logger(None, name, fields)
}

/// Create a logger derived from `parent` through the current factory. The
/// factory decides what the child inherits.
pub fn child_logger(parent: Option<SharedLogger>, name: &str, fields: Vec<Field>) -> SharedLogger {
    // clone out of the lock so the factory may use the registry itself
    let factory = slots().read().factory.clone();
    factory(parent, name, fields)
}

/// An unnamed logger from the current factory.
pub fn default_logger() -> SharedLogger {
    new_logger("", Vec::new())
}
