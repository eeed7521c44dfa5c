//! Structured query representation
//!
//! A `QueryNode` is the input tree that gets rendered into a query string.
//! Value shapes (scalar, disjunction, range) are decided once, when the
//! tree is built, so rendering can match on them exhaustively.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;

use super::formatter::format_timestamp;
use super::types::Operator;

/// A single literal value
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl Scalar {
    /// Type name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
            Scalar::Date(_) => "date",
        }
    }
}

/// Plain textual form, used when a type has no rendering rule of its own
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Date(d) => f.write_str(&format_timestamp(d)),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Integer(value.into())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(value: DateTime<Utc>) -> Self {
        Scalar::Date(value)
    }
}

/// Inclusive interval; a missing endpoint makes the whole range render to nothing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Range {
    pub from: Option<Scalar>,
    pub to: Option<Scalar>,
}

impl Range {
    pub fn new(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Check if both endpoints are present
    pub fn is_bounded(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }
}

/// Value attached to a field in a term group
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// No value; the field is dropped from the output
    Null,
    Scalar(Scalar),
    /// Any of the values
    Disjunction(Vec<FieldValue>),
    Range(Range),
}

impl FieldValue {
    pub fn range(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Self {
        FieldValue::Range(Range::new(from, to))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

macro_rules! impl_scalar_field_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Scalar(value.into())
                }
            }
        )*
    };
}

impl_scalar_field_value!(&str, String, i64, i32, u32, f64, bool, DateTime<Utc>);

impl From<Scalar> for FieldValue {
    fn from(value: Scalar) -> Self {
        FieldValue::Scalar(value)
    }
}

impl From<Range> for FieldValue {
    fn from(range: Range) -> Self {
        FieldValue::Range(range)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Disjunction(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Field name to value mapping, rendered as a conjunctive clause list
///
/// Iteration follows insertion order, which is also the clause order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermGroup {
    fields: IndexMap<String, FieldValue>,
}

impl TermGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value with the same name
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One entry of a query node's operand list
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// Field clauses, spliced into the parent's clause list
    Terms(TermGroup),
    /// Free-text term, emitted verbatim (wildcards included)
    Text(String),
    /// Nested sub-query
    Query(QueryNode),
}

impl Operand {
    pub fn text(text: impl Into<String>) -> Self {
        Operand::Text(text.into())
    }
}

impl From<TermGroup> for Operand {
    fn from(group: TermGroup) -> Self {
        Operand::Terms(group)
    }
}

impl From<QueryNode> for Operand {
    fn from(node: QueryNode) -> Self {
        Operand::Query(node)
    }
}

impl From<&str> for Operand {
    fn from(text: &str) -> Self {
        Operand::Text(text.to_string())
    }
}

impl From<String> for Operand {
    fn from(text: String) -> Self {
        Operand::Text(text)
    }
}

/// Query node: an operator applied to an ordered operand list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryNode {
    pub operator: Operator,
    pub operands: Vec<Operand>,
}

impl QueryNode {
    pub fn new<I, O>(operator: Operator, operands: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        Self {
            operator,
            operands: operands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and<I, O>(operands: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        Self::new(Operator::And, operands)
    }

    pub fn or<I, O>(operands: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        Self::new(Operator::Or, operands)
    }

    pub fn not<I, O>(operands: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand>,
    {
        Self::new(Operator::Not, operands)
    }

    /// Nesting depth, counting this node as 1
    pub fn depth(&self) -> usize {
        1 + self
            .operands
            .iter()
            .filter_map(|operand| match operand {
                Operand::Query(node) => Some(node.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}
