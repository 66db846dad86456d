//! Development-mode detection from environment variables.
//!
//! `is_development` evaluates, in order:
//! - any `_INTELLIJ_*` or `VSCODE_*` variable is defined → true
//! - `XPC_SERVICE_NAME` contains `goland` → true
//! - `APP_ENV` (or, if blank, `NODE_ENV`) is set: true unless it is `production`
//! - otherwise false
//!
//! Missing or unreadable variables never fail; they count as absent, which
//! selects production behavior.

use std::collections::HashMap;

use crate::render::Format;

/// Overrides the detected renderer (`plain`, `color`, `json`, ...).
pub const FORMAT_VAR: &str = "FIELDLOG_FORMAT";

/// Enables `@timestamp` on loggers built by [`crate::LogConfig::from_env`].
pub const TIMESTAMPS_VAR: &str = "FIELDLOG_TIMESTAMPS";

const IDE_PREFIXES: [&str; 2] = ["_INTELLIJ_", "VSCODE_"];
const APP_ENV_VARS: [&str; 2] = ["APP_ENV", "NODE_ENV"];
const PRODUCTION: &str = "production";

/// Snapshot of the process environment. Non-UTF-8 entries are converted
/// lossily instead of panicking.
pub fn process_vars() -> Vec<(String, String)> {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

pub fn is_development() -> bool {
    is_development_in(process_vars())
}

/// [`is_development`] over an explicit variable list.
pub fn is_development_in<I, K, V>(vars: I) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    development(&collect(vars))
}

/// Renderer selected when nothing was configured explicitly: the
/// `FIELDLOG_FORMAT` override if it parses, else colored in development and
/// structured otherwise.
pub fn default_format() -> Format {
    default_format_in(process_vars())
}

pub fn default_format_in<I, K, V>(vars: I) -> Format
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars = collect(vars);
    if let Some(format) = vars.get(FORMAT_VAR).and_then(|v| v.parse().ok()) {
        return format;
    }

    if development(&vars) {
        Format::Colored
    } else {
        Format::Structured
    }
}

/// Truthy values: `1`, `true`, `yes`, `on` (case-insensitive).
pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub(crate) fn collect<I, K, V>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

fn development(vars: &HashMap<String, String>) -> bool {
    if vars
        .keys()
        .any(|k| IDE_PREFIXES.iter().any(|prefix| k.starts_with(prefix)))
    {
        return true;
    }

    if vars
        .get("XPC_SERVICE_NAME")
        .is_some_and(|v| v.contains("goland"))
    {
        return true;
    }

    for name in APP_ENV_VARS {
        if let Some(value) = vars.get(name) {
            if !value.trim().is_empty() {
                return value != PRODUCTION;
            }
        }
    }

    false
}
