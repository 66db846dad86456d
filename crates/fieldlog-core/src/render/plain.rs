//! Plain renderer: values in input order, keys dropped.

use super::Render;
use crate::field::Field;

/// Prints each field's value (not its key) in exactly the given order,
/// separated by a single space. No deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Render for Plain {
    fn render(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|field| field.value().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
