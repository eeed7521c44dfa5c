//! Schema and field type system
//!
//! This module defines how field names resolve to types:
//! - Field types (string, int, long, float, double, boolean, date)
//! - Per-field mappings with the `allowSpecialCharacters` override

mod field_type;
mod mapping;

pub use field_type::FieldType;
pub use mapping::{FieldMapping, Schema};
