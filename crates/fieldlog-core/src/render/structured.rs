//! Structured renderer: one JSON object per line.

use std::backtrace::Backtrace;
use std::collections::BTreeMap;

use super::Render;
use crate::ecs;
use crate::error::LogResult;
use crate::field::{Field, FieldValue};

/// Removes duplicate keys (the last occurrence wins) and prints the result
/// as a single-line JSON object with keys sorted ascending.
///
/// `message` fields are the exception: they are joined with a space in
/// input order, so a template and an appended detail both survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Structured;

impl Structured {
    /// Fold fields into the key → value map that gets serialized.
    pub fn collapse(fields: &[Field]) -> BTreeMap<&str, FieldValue> {
        let mut map: BTreeMap<&str, FieldValue> = BTreeMap::new();
        for field in fields {
            let key = field.key();
            if key == ecs::MESSAGE {
                if let Some(existing) = map.get_mut(key) {
                    let joined = format!("{} {}", existing, field.value());
                    *existing = FieldValue::Str(joined);
                    continue;
                }
            }
            map.insert(key, field.value().clone());
        }
        map
    }

    /// Render, reporting serialization failures instead of degrading.
    pub fn try_render(&self, fields: &[Field]) -> LogResult<String> {
        let map = Self::collapse(fields);
        Ok(serde_json::to_string(&map)?)
    }
}

impl Render for Structured {
    fn render(&self, fields: &[Field]) -> String {
        match self.try_render(fields) {
            Ok(line) => line,
            Err(err) => format!(
                "unable to marshal fields to json: {}\n{}\n{:?}",
                err,
                Backtrace::force_capture(),
                fields
            ),
        }
    }
}
