//! Term extraction
//!
//! Turns a term group into `field:value` clauses, and free text into a
//! verbatim clause.

use tracing::trace;

use super::ast::TermGroup;
use super::escape::escape;
use super::formatter::ValueFormatter;
use crate::schema::Schema;
use crate::Result;

/// Render each field of a term group as a clause, in insertion order
///
/// Fields whose value renders to nothing are dropped.
pub fn extract_terms(group: &TermGroup, schema: &Schema) -> Result<Vec<String>> {
    let mut clauses = Vec::with_capacity(group.len());

    for (field, value) in group.iter() {
        if value.is_null() {
            trace!(field, "skipping null field");
            continue;
        }

        let mapping = schema.resolve(field);
        match ValueFormatter::new(field, mapping).format(value)? {
            Some(literal) => clauses.push(format!(
                "{}{}:{}",
                escape(field),
                mapping.field_type.suffix(),
                literal
            )),
            None => trace!(field, "field rendered no value"),
        }
    }

    Ok(clauses)
}

/// Free text is emitted as-is so wildcard syntax survives
pub fn extract_text(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
