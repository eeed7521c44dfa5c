//! Query description parser
//!
//! Decodes the JSON query description into a `QueryNode` tree:
//!
//! ```json
//! {
//!   "$operator": "or",
//!   "$operands": [
//!     { "name": "gareth" },
//!     { "$operator": "not", "$operands": { "age": { "$from": 55, "$to": 63 } } },
//!     "free text*"
//!   ]
//! }
//! ```
//!
//! Only a non-null `$operands` key marks a nested query; any other object is
//! a term group, so ordinary fields may be called `operands` or `from`.

use serde_json::{Map, Number, Value};

use super::ast::{FieldValue, Operand, QueryNode, Range, Scalar, TermGroup};
use super::types::Operator;
use crate::error::QuerygenError;
use crate::Result;

const OPERATOR_KEY: &str = "$operator";
const OPERANDS_KEY: &str = "$operands";
const FROM_KEY: &str = "$from";
const TO_KEY: &str = "$to";

/// Query parser for JSON query descriptions
pub struct QueryParser;

impl QueryParser {
    /// Parse a JSON query node
    pub fn parse(json: &Value) -> Result<QueryNode> {
        match json {
            Value::Object(map) => Self::parse_node(map),
            _ => Err(QuerygenError::InvalidRequest(
                "Query must be a JSON object".to_string(),
            )),
        }
    }

    /// Parse a JSON string into a query node
    pub fn parse_str(json_str: &str) -> Result<QueryNode> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| QuerygenError::InvalidRequest(format!("Invalid JSON: {}", e)))?;
        Self::parse(&value)
    }

    /// Check if an object is a query node rather than a term group
    pub fn is_query_node(map: &Map<String, Value>) -> bool {
        map.get(OPERANDS_KEY).is_some_and(|operands| !operands.is_null())
    }

    fn parse_node(map: &Map<String, Value>) -> Result<QueryNode> {
        let operator = match map.get(OPERATOR_KEY) {
            None | Some(Value::Null) => Operator::default(),
            Some(Value::String(code)) => Operator::resolve(Some(code.as_str())),
            Some(other) => {
                return Err(QuerygenError::InvalidRequest(format!(
                    "operator must be a string, got {}",
                    other
                )))
            }
        };

        let operands = match map.get(OPERANDS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(Self::parse_operand)
                .collect::<Result<Vec<_>>>()?,
            // Single operand can be provided without array wrapper
            Some(single) => vec![Self::parse_operand(single)?],
        };

        Ok(QueryNode { operator, operands })
    }

    fn parse_operand(value: &Value) -> Result<Operand> {
        match value {
            Value::String(text) => Ok(Operand::Text(text.clone())),
            Value::Object(map) if Self::is_query_node(map) => {
                Ok(Operand::Query(Self::parse_node(map)?))
            }
            Value::Object(map) => Ok(Operand::Terms(Self::parse_term_group(map)?)),
            _ => Err(QuerygenError::InvalidRequest(format!(
                "Operand must be an object or a string, got {}",
                value
            ))),
        }
    }

    fn parse_term_group(map: &Map<String, Value>) -> Result<TermGroup> {
        let mut group = TermGroup::new();
        for (field, value) in map {
            group.insert(field.clone(), Self::parse_field_value(field, value)?);
        }
        Ok(group)
    }

    /// Parse a field value: null, scalar, array (any of) or range object
    pub fn parse_field_value(field: &str, value: &Value) -> Result<FieldValue> {
        match value {
            Value::Null => Ok(FieldValue::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| Self::parse_field_value(field, item))
                .collect::<Result<Vec<_>>>()
                .map(FieldValue::Disjunction),
            Value::Object(map) => Self::parse_range(field, map).map(FieldValue::Range),
            scalar => Self::parse_scalar(field, scalar).map(FieldValue::Scalar),
        }
    }

    /// Parse a range object; a missing endpoint is kept as `None`
    fn parse_range(field: &str, map: &Map<String, Value>) -> Result<Range> {
        let from = map.get(FROM_KEY);
        let to = map.get(TO_KEY);

        if from.is_none() && to.is_none() {
            return Err(QuerygenError::invalid_value(
                field,
                "objects must be ranges with '$from' and '$to'",
            ));
        }

        Ok(Range {
            from: Self::parse_endpoint(field, from)?,
            to: Self::parse_endpoint(field, to)?,
        })
    }

    fn parse_endpoint(field: &str, value: Option<&Value>) -> Result<Option<Scalar>> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(QuerygenError::invalid_value(
                field,
                "range endpoints must be scalars",
            )),
            Some(scalar) => Self::parse_scalar(field, scalar).map(Some),
        }
    }

    fn parse_scalar(field: &str, value: &Value) -> Result<Scalar> {
        match value {
            Value::String(s) => Ok(Scalar::String(s.clone())),
            Value::Bool(b) => Ok(Scalar::Boolean(*b)),
            Value::Number(n) => Self::parse_number(field, n),
            _ => Err(QuerygenError::invalid_value(
                field,
                format!("expected a scalar, got {}", value),
            )),
        }
    }

    fn parse_number(field: &str, n: &Number) -> Result<Scalar> {
        if let Some(i) = n.as_i64() {
            Ok(Scalar::Integer(i))
        } else if let Some(f) = n.as_f64() {
            Ok(Scalar::Float(f))
        } else {
            Err(QuerygenError::invalid_value(
                field,
                format!("unrepresentable number {}", n),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_term_group() {
        let node = QueryParser::parse(&json!({ "$operands": { "name": "gareth" } })).unwrap();
        assert_eq!(node.operator, Operator::And);
        assert_eq!(
            node.operands,
            vec![Operand::Terms(TermGroup::new().with("name", "gareth"))]
        );
    }

    #[test]
    fn test_parse_operator_codes() {
        let node = QueryParser::parse(&json!({ "$operator": "OR", "$operands": [] })).unwrap();
        assert_eq!(node.operator, Operator::Or);

        let node = QueryParser::parse(&json!({ "$operator": "nand", "$operands": [] })).unwrap();
        assert_eq!(node.operator, Operator::And);

        assert!(QueryParser::parse(&json!({ "$operator": 1, "$operands": [] })).is_err());
    }

    #[test]
    fn test_parse_mixed_operands() {
        let node = QueryParser::parse(&json!({
            "$operands": [
                { "name": "gareth" },
                "new",
                { "$operator": "not", "$operands": { "job": "geek" } }
            ]
        }))
        .unwrap();

        assert_eq!(node.operands.len(), 3);
        assert!(matches!(node.operands[0], Operand::Terms(_)));
        assert_eq!(node.operands[1], Operand::text("new"));
        match &node.operands[2] {
            Operand::Query(nested) => assert_eq!(nested.operator, Operator::Not),
            other => panic!("expected nested query, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_keys_are_plain_fields() {
        let node = QueryParser::parse(&json!({
            "$operands": [
                { "operands": "foo", "name": "x" },
                { "span": { "from": 1, "to": 2 } }
            ]
        }))
        .unwrap();
        assert_eq!(
            node.operands[0],
            Operand::Terms(TermGroup::new().with("operands", "foo").with("name", "x"))
        );
        assert!(matches!(
            QueryParser::parse_field_value("span", &json!({ "from": 1, "to": 2 })),
            Err(QuerygenError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_null_operands_field_is_not_a_node() {
        let node = QueryParser::parse(&json!({
            "$operands": { "job": "geek", "$operands": null }
        }))
        .unwrap();
        match &node.operands[0] {
            Operand::Terms(group) => {
                assert_eq!(group.get("job"), Some(&FieldValue::from("geek")));
                assert_eq!(group.get("$operands"), Some(&FieldValue::Null));
            }
            other => panic!("expected term group, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_operands_is_empty() {
        let node = QueryParser::parse(&json!({ "$operator": "or" })).unwrap();
        assert!(node.operands.is_empty());
    }

    #[test]
    fn test_parse_field_values() {
        assert_eq!(
            QueryParser::parse_field_value("f", &json!(null)).unwrap(),
            FieldValue::Null
        );
        assert_eq!(
            QueryParser::parse_field_value("f", &json!(-3.5)).unwrap(),
            FieldValue::Scalar(Scalar::Float(-3.5))
        );
        assert_eq!(
            QueryParser::parse_field_value("f", &json!(123456789)).unwrap(),
            FieldValue::Scalar(Scalar::Integer(123456789))
        );
        assert_eq!(
            QueryParser::parse_field_value("f", &json!(["a", null])).unwrap(),
            FieldValue::Disjunction(vec![FieldValue::from("a"), FieldValue::Null])
        );
    }

    #[test]
    fn test_parse_partial_range() {
        let value = QueryParser::parse_field_value("age", &json!({ "$from": 55 })).unwrap();
        assert_eq!(
            value,
            FieldValue::Range(Range {
                from: Some(Scalar::Integer(55)),
                to: None,
            })
        );
    }

    #[test]
    fn test_reject_invalid_values() {
        let err = QueryParser::parse_field_value("age", &json!({ "gt": 5 })).unwrap_err();
        assert!(matches!(err, QuerygenError::InvalidValue { ref field, .. } if field == "age"));

        assert!(QueryParser::parse_field_value("age", &json!({ "$from": [1, 2], "$to": 3 })).is_err());
        assert!(QueryParser::parse_field_value("age", &json!({ "$from": { "x": 1 }, "$to": 3 })).is_err());
    }

    #[test]
    fn test_reject_invalid_operands() {
        assert!(QueryParser::parse(&json!({ "$operands": [42] })).is_err());
        assert!(QueryParser::parse(&json!("name:gareth")).is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = QueryParser::parse_str("not valid json");
        assert!(matches!(result, Err(QuerygenError::InvalidRequest(_))));
    }

    #[test]
    fn test_null_operands_are_skipped() {
        let node = QueryParser::parse(&json!({ "$operands": [null, { "a": "b" }] })).unwrap();
        assert_eq!(node.operands.len(), 1);
    }
}
