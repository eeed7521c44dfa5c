//! Schema mapping definitions
//!
//! A schema maps field names to their types and per-field rendering options.
//! Fields without an entry are treated as `string`.

use super::field_type::FieldType;
use crate::error::QuerygenError;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Field mapping configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MappingRepr")]
pub struct FieldMapping {
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Pass scalar values through unquoted and unescaped (default: false)
    #[serde(default)]
    pub allow_special_characters: bool,
}

impl FieldMapping {
    /// Create a new field mapping with the given type
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            allow_special_characters: false,
        }
    }

    /// Set whether scalar values bypass the type's rendering rule
    pub fn with_special_characters(mut self, allow: bool) -> Self {
        self.allow_special_characters = allow;
        self
    }

    /// Check if scalars should be rendered with the type's custom rule
    pub fn uses_custom_format(&self) -> bool {
        self.field_type.has_custom_format() && !self.allow_special_characters
    }
}

/// Serialized forms: a bare type name or a full record
#[derive(Deserialize)]
#[serde(untagged)]
enum MappingRepr {
    Name(FieldType),
    #[serde(rename_all = "camelCase")]
    Record {
        #[serde(rename = "type", default)]
        field_type: FieldType,
        #[serde(default)]
        allow_special_characters: bool,
    },
}

impl From<MappingRepr> for FieldMapping {
    fn from(repr: MappingRepr) -> Self {
        match repr {
            MappingRepr::Name(field_type) => FieldMapping::new(field_type),
            MappingRepr::Record {
                field_type,
                allow_special_characters,
            } => FieldMapping::new(field_type).with_special_characters(allow_special_characters),
        }
    }
}

impl From<FieldType> for FieldMapping {
    fn from(field_type: FieldType) -> Self {
        Self::new(field_type)
    }
}

/// Field name to mapping lookup, supplied per conversion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, FieldMapping>,
}

impl Schema {
    /// Create an empty schema (every field is a string)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field mapping
    pub fn with_field(mut self, name: impl Into<String>, mapping: impl Into<FieldMapping>) -> Self {
        self.insert(name, mapping);
        self
    }

    /// Add or replace a field mapping in place
    pub fn insert(&mut self, name: impl Into<String>, mapping: impl Into<FieldMapping>) {
        self.fields.insert(name.into(), mapping.into());
    }

    /// Resolve the mapping for a field, defaulting to an untyped string
    pub fn resolve(&self, field: &str) -> FieldMapping {
        self.fields.get(field).copied().unwrap_or_default()
    }

    /// Get the explicit mapping for a field, if any
    pub fn get(&self, field: &str) -> Option<&FieldMapping> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode a schema from its JSON form
    ///
    /// ```json
    /// { "age": "int", "tag": { "type": "string", "allowSpecialCharacters": true } }
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Null => Ok(Self::new()),
            _ => Err(QuerygenError::InvalidSchema(
                "schema must be a JSON object".to_string(),
            )),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut schema = Self::new();
        for (field, spec) in map {
            schema.insert(field.clone(), Self::parse_mapping(field, spec)?);
        }
        Ok(schema)
    }

    fn parse_mapping(field: &str, spec: &Value) -> Result<FieldMapping> {
        match spec {
            Value::String(name) => Ok(FieldMapping::new(name.parse()?)),
            Value::Object(record) => {
                let field_type = match record.get("type") {
                    Some(Value::String(name)) => name.parse()?,
                    None | Some(Value::Null) => FieldType::default(),
                    Some(other) => {
                        return Err(QuerygenError::InvalidSchema(format!(
                            "type of field '{}' must be a string, got {}",
                            field, other
                        )))
                    }
                };

                let allow = match record.get("allowSpecialCharacters") {
                    Some(Value::Bool(b)) => *b,
                    None | Some(Value::Null) => false,
                    Some(other) => {
                        return Err(QuerygenError::InvalidSchema(format!(
                            "allowSpecialCharacters of field '{}' must be a boolean, got {}",
                            field, other
                        )))
                    }
                };

                Ok(FieldMapping::new(field_type).with_special_characters(allow))
            }
            _ => Err(QuerygenError::InvalidSchema(format!(
                "field '{}' must map to a type name or an object",
                field
            ))),
        }
    }
}

impl FromStr for Schema {
    type Err = QuerygenError;

    fn from_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| QuerygenError::InvalidSchema(format!("Invalid JSON: {}", e)))?;
        Self::from_value(&value)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, field_type) in iter {
            schema.insert(name, field_type);
        }
        schema
    }
}
