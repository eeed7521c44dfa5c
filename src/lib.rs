pub mod config;
pub mod error;
pub mod query;
pub mod schema;

pub use config::ConvertOptions;
pub use error::{QuerygenError, Result};
pub use query::{FieldValue, Operand, Operator, QueryNode, QueryParser, Range, Scalar, TermGroup};
pub use schema::{FieldMapping, FieldType, Schema};

use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert a query node into a query string
///
/// ```rust
/// use querygen::{convert, ConvertOptions, FieldType, QueryNode, Schema, TermGroup};
///
/// let node = QueryNode::and([TermGroup::new().with("age", querygen::FieldValue::range(55, 63))]);
/// let options = ConvertOptions::new(Schema::new().with_field("age", FieldType::Int));
/// assert_eq!(convert(&node, &options).unwrap(), "age<int>:[55 TO 63]");
/// ```
pub fn convert(node: &QueryNode, options: &ConvertOptions) -> Result<String> {
    query::QueryComposer::new(options).compose(node)
}

/// Decode a JSON query description and options, then convert
///
/// ```rust
/// use serde_json::json;
///
/// let query = json!({ "$operator": "not", "$operands": { "name": "gareth" } });
/// assert_eq!(querygen::convert_json(&query, None).unwrap(), "NOT name:\"gareth\"");
/// ```
pub fn convert_json(query: &Value, options: Option<&Value>) -> Result<String> {
    let node = QueryParser::parse(query)?;
    let options = match options {
        Some(value) => ConvertOptions::from_value(value)?,
        None => ConvertOptions::default(),
    };
    convert(&node, &options)
}
