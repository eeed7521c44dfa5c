use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::QuerygenError;
use crate::schema::Schema;
use crate::Result;

/// Default limit on nested query nodes
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for a single conversion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Field types; fields missing from it are strings
    #[serde(default)]
    pub schema: Schema,
    /// Maximum nesting of query nodes, counting the root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decode options from `{ "schema": {...}, "maxDepth": n }`
    ///
    /// `null` yields the defaults.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => map,
            _ => {
                return Err(QuerygenError::InvalidRequest(
                    "options must be a JSON object".to_string(),
                ))
            }
        };

        let mut options = Self::default();

        if let Some(schema) = map.get("schema") {
            options.schema = Schema::from_value(schema)?;
        }

        if let Some(depth) = map.get("maxDepth").filter(|v| !v.is_null()) {
            let invalid = || {
                QuerygenError::InvalidRequest(format!(
                    "maxDepth must be a non-negative integer that fits in usize, got {}",
                    depth
                ))
            };
            let value = depth.as_u64().ok_or_else(invalid)?;
            options.max_depth = usize::try_from(value).map_err(|_| invalid())?;
        }

        Ok(options)
    }
}
