//! Colored console renderer for developer machines.
//!
//! Prints values in input order like [`super::Plain`], scattered with ANSI
//! color codes keyed off reserved field names:
//!
//! - `log.level`: upper-cased, colored by level
//!   (trace=cyan, debug=magenta, info=blue, warn=yellow, anything else=red)
//! - `@timestamp`: cyan
//! - `error.stack_trace`: red, continuation lines indented to the width of a
//!   timestamp
//! - `message`: the color of the last level seen earlier in the same line
//!
//! Every colored segment is closed with a reset code.

use super::Render;
use crate::ecs;
use crate::field::Field;

pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const BLUE: &str = "\x1b[34m";
pub(crate) const MAGENTA: &str = "\x1b[35m";
pub(crate) const CYAN: &str = "\x1b[36m";

/// Width of an RFC3339 timestamp with offset, e.g. `2020-11-20T10:54:11+01:00`.
pub const STACK_TRACE_INDENT: usize = 25;

#[derive(Debug, Clone, Copy, Default)]
pub struct Colored;

impl Render for Colored {
    fn render(&self, fields: &[Field]) -> String {
        let mut out = String::new();
        let mut message_color: Option<&'static str> = None;

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }

            let value = field.value();
            match (field.key(), value.as_str()) {
                (ecs::LOG_LEVEL, Some(level)) => {
                    let color = level_color(level);
                    message_color = Some(color);
                    paint(&mut out, color, &level.to_uppercase());
                }
                (ecs::TIMESTAMP, _) => paint(&mut out, CYAN, &value.to_string()),
                (ecs::ERROR_STACK_TRACE, Some(trace)) => {
                    let continuation = format!("\n{}{}", " ".repeat(STACK_TRACE_INDENT), RED);
                    paint(&mut out, RED, &trace.replace('\n', &continuation));
                }
                (ecs::ERROR_STACK_TRACE, None) => paint(&mut out, RED, &value.to_string()),
                (ecs::MESSAGE, _) => match message_color {
                    Some(color) => paint(&mut out, color, &value.to_string()),
                    None => out.push_str(&value.to_string()),
                },
                _ => out.push_str(&value.to_string()),
            }
        }

        out
    }
}

fn level_color(level: &str) -> &'static str {
    match level {
        "trace" => CYAN,
        "debug" => MAGENTA,
        "info" => BLUE,
        "warn" => YELLOW,
        _ => RED,
    }
}

fn paint(out: &mut String, color: &str, text: &str) {
    out.push_str(color);
    out.push_str(text);
    out.push_str(RESET);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;

    #[test]
    fn test_level_is_uppercased_and_colored() {
        let out = Colored.render(&[ecs::warn(), ecs::message("disk almost full")]);
        assert_eq!(
            out,
            format!("{YELLOW}WARN{RESET} {YELLOW}disk almost full{RESET}")
        );
    }

    #[test]
    fn test_level_colors() {
        let cases = [
            (ecs::trace(), CYAN),
            (ecs::debug(), MAGENTA),
            (ecs::info(), BLUE),
            (ecs::warn(), YELLOW),
            (ecs::error(), RED),
            (ecs::fatal(), RED),
            (ecs::panic(), RED),
        ];
        for (field, color) in cases {
            let out = Colored.render(&[field]);
            assert!(out.starts_with(color), "{:?}", out);
            assert!(out.ends_with(RESET));
        }
    }

    #[test]
    fn test_message_without_level_is_uncolored() {
        let out = Colored.render(&[ecs::message("hello"), ecs::info()]);
        assert_eq!(out, format!("hello {BLUE}INFO{RESET}"));
    }

    #[test]
    fn test_timestamp_is_cyan() {
        let out = Colored.render(&[Field::new(ecs::TIMESTAMP, "2020-11-20T10:54:11Z")]);
        assert_eq!(out, format!("{CYAN}2020-11-20T10:54:11Z{RESET}"));
    }

    #[test]
    fn test_stack_trace_continuation_lines_are_indented() {
        let out = Colored.render(&[Field::new(ecs::ERROR_STACK_TRACE, "a\nb")]);
        let indent = " ".repeat(STACK_TRACE_INDENT);
        assert_eq!(out, format!("{RED}a\n{indent}{RED}b{RESET}"));
    }

    #[test]
    fn test_other_fields_print_plain_values() {
        let out = Colored.render(&[
            ecs::logger("app.db"),
            Field::new("custom", FieldValue::Seq(vec![FieldValue::Int(1), FieldValue::Int(2)])),
        ]);
        assert_eq!(out, "app.db [1 2]");
    }
}
