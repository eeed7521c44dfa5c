//! Field type definitions
//!
//! Defines the type suffix and literal rendering of each field type.

use crate::error::QuerygenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field data type
///
/// Determines the suffix appended to the field name and how scalar
/// values are rendered as literals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Quoted string literal (default for fields missing from the schema)
    #[default]
    String,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// Boolean value
    Boolean,
    /// Date/time, rendered as quoted ISO-8601 text
    Date,
}

impl FieldType {
    /// All field types, in declaration order
    pub const ALL: [FieldType; 7] = [
        FieldType::String,
        FieldType::Int,
        FieldType::Long,
        FieldType::Float,
        FieldType::Double,
        FieldType::Boolean,
        FieldType::Date,
    ];

    /// Suffix token appended to the field name, e.g. `<int>`
    pub fn suffix(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Boolean => "",
            FieldType::Int => "<int>",
            FieldType::Long => "<long>",
            FieldType::Float => "<float>",
            FieldType::Double => "<double>",
            FieldType::Date => "<date>",
        }
    }

    /// Check if this type has its own literal rendering rule
    ///
    /// Types without one pass values through in their plain textual form.
    pub fn has_custom_format(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Date)
    }

    /// Name used in schemas
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        }
    }
}

impl FromStr for FieldType {
    type Err = QuerygenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "int" => Ok(FieldType::Int),
            "long" => Ok(FieldType::Long),
            "float" => Ok(FieldType::Float),
            "double" => Ok(FieldType::Double),
            "boolean" => Ok(FieldType::Boolean),
            "date" => Ok(FieldType::Date),
            _ => Err(QuerygenError::UnknownFieldType(s.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
