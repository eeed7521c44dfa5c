//! Value formatting
//!
//! Renders field values as grammar literals. A value that renders to `None`
//! (null, empty disjunction, range with a missing endpoint) drops its clause.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use super::ast::{FieldValue, Range, Scalar};
use super::escape::quote;
use crate::error::QuerygenError;
use crate::schema::{FieldMapping, FieldType};
use crate::Result;

/// Formats the values of a single field
#[derive(Clone, Copy, Debug)]
pub struct ValueFormatter<'a> {
    field: &'a str,
    mapping: FieldMapping,
}

impl<'a> ValueFormatter<'a> {
    pub fn new(field: &'a str, mapping: FieldMapping) -> Self {
        Self { field, mapping }
    }

    /// Render a value, or `None` when it contributes no clause
    pub fn format(&self, value: &FieldValue) -> Result<Option<String>> {
        match value {
            FieldValue::Null => Ok(None),
            FieldValue::Scalar(scalar) => self.format_scalar(scalar).map(Some),
            FieldValue::Disjunction(values) => {
                let mut parts = Vec::with_capacity(values.len());
                for value in values {
                    if let Some(part) = self.format(value)? {
                        parts.push(part);
                    }
                }
                Ok(disjunction(parts))
            }
            FieldValue::Range(range) => self.format_range(range),
        }
    }

    fn format_range(&self, range: &Range) -> Result<Option<String>> {
        match (&range.from, &range.to) {
            (Some(from), Some(to)) => Ok(Some(format!(
                "[{} TO {}]",
                self.format_scalar(from)?,
                self.format_scalar(to)?
            ))),
            _ => Ok(None),
        }
    }

    /// Render a scalar with the field type's rule, or verbatim when the type
    /// has none or the mapping allows special characters
    pub fn format_scalar(&self, scalar: &Scalar) -> Result<String> {
        if !self.mapping.uses_custom_format() {
            return Ok(scalar.to_string());
        }
        match self.mapping.field_type {
            FieldType::Date => Ok(quote(&format_timestamp(&self.to_timestamp(scalar)?))),
            _ => Ok(quote(&scalar.to_string())),
        }
    }

    /// Normalize a scalar to a UTC timestamp
    ///
    /// Numbers are milliseconds since the Unix epoch; strings are ISO-8601,
    /// with a missing offset read as UTC.
    fn to_timestamp(&self, scalar: &Scalar) -> Result<DateTime<Utc>> {
        let parsed = match scalar {
            Scalar::Date(date) => Some(*date),
            Scalar::Integer(millis) => Utc.timestamp_millis_opt(*millis).single(),
            Scalar::Float(millis) if millis.is_finite() => {
                Utc.timestamp_millis_opt(millis.trunc() as i64).single()
            }
            Scalar::Float(_) => None,
            Scalar::String(text) => parse_iso_date(text),
            Scalar::Boolean(_) => {
                return Err(QuerygenError::invalid_value(
                    self.field,
                    format!("{} is not a date", scalar.kind()),
                ))
            }
        };

        parsed.ok_or_else(|| QuerygenError::InvalidDate {
            field: self.field.to_string(),
            value: scalar.to_string(),
        })
    }
}

fn parse_iso_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// ISO-8601 text with millisecond precision, e.g. `1970-01-02T10:17:36.789Z`
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Combine rendered values into an "any of" group
pub fn disjunction(mut parts: Vec<String>) -> Option<String> {
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(format!("({})", parts.join(" OR "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(field_type: FieldType) -> ValueFormatter<'static> {
        ValueFormatter::new("field", FieldMapping::new(field_type))
    }

    fn format(field_type: FieldType, value: impl Into<FieldValue>) -> Option<String> {
        formatter(field_type).format(&value.into()).unwrap()
    }

    #[test]
    fn test_string_is_quoted() {
        assert_eq!(format(FieldType::String, "gareth").as_deref(), Some("\"gareth\""));
        assert_eq!(
            format(FieldType::String, "say \"hi\"").as_deref(),
            Some("\"say \\\"hi\\\"\"")
        );
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(format(FieldType::Int, 55).as_deref(), Some("55"));
        assert_eq!(format(FieldType::Int, 0).as_deref(), Some("0"));
        assert_eq!(format(FieldType::Long, 123456789i64).as_deref(), Some("123456789"));
        assert_eq!(format(FieldType::Float, 5.5).as_deref(), Some("5.5"));
        assert_eq!(
            format(FieldType::Double, -5.123456789).as_deref(),
            Some("-5.123456789")
        );
        assert_eq!(format(FieldType::Boolean, true).as_deref(), Some("true"));
        assert_eq!(format(FieldType::Boolean, false).as_deref(), Some("false"));
    }

    #[test]
    fn test_number_on_string_field_is_quoted() {
        assert_eq!(format(FieldType::String, 55).as_deref(), Some("\"55\""));
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            format(FieldType::Date, 123456789i64).as_deref(),
            Some("\"1970-01-02T10:17:36.789Z\"")
        );
        assert_eq!(
            format(FieldType::Date, "2014-05-31T11:00:00.000Z").as_deref(),
            Some("\"2014-05-31T11:00:00.000Z\"")
        );
        assert_eq!(
            format(FieldType::Date, "2014-05-31T13:00:00+02:00").as_deref(),
            Some("\"2014-05-31T11:00:00.000Z\"")
        );
    }

    #[test]
    fn test_dates_without_offset() {
        assert_eq!(
            format(FieldType::Date, "2014-05-31").as_deref(),
            Some("\"2014-05-31T00:00:00.000Z\"")
        );
        assert_eq!(
            format(FieldType::Date, "2014-05-31T11:00:00").as_deref(),
            Some("\"2014-05-31T11:00:00.000Z\"")
        );
        assert_eq!(
            format(FieldType::Date, "2014-05-31T11:00:00.250").as_deref(),
            Some("\"2014-05-31T11:00:00.250Z\"")
        );
    }

    #[test]
    fn test_invalid_dates() {
        for text in ["yesterday", "2014-13-01", "2014-05-31 11:00"] {
            let value = FieldValue::from(text);
            assert!(matches!(
                formatter(FieldType::Date).format(&value),
                Err(QuerygenError::InvalidDate { .. })
            ));
        }

        let value = FieldValue::from(true);
        assert!(matches!(
            formatter(FieldType::Date).format(&value),
            Err(QuerygenError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_disjunctions() {
        assert_eq!(format(FieldType::String, Vec::<&str>::new()), None);
        assert_eq!(
            format(FieldType::String, vec!["gareth"]).as_deref(),
            Some("\"gareth\"")
        );
        assert_eq!(
            format(FieldType::String, vec!["gareth", "milan"]).as_deref(),
            Some("(\"gareth\" OR \"milan\")")
        );
    }

    #[test]
    fn test_disjunction_skips_nulls() {
        let value = FieldValue::Disjunction(vec![
            FieldValue::Null,
            FieldValue::from(1),
            FieldValue::Null,
        ]);
        assert_eq!(
            formatter(FieldType::Int).format(&value).unwrap().as_deref(),
            Some("1")
        );

        let value = FieldValue::Disjunction(vec![FieldValue::Null]);
        assert_eq!(formatter(FieldType::Int).format(&value).unwrap(), None);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            format(FieldType::Int, FieldValue::range(55, 63)).as_deref(),
            Some("[55 TO 63]")
        );
        assert_eq!(
            format(FieldType::String, FieldValue::range("gareth", "milan")).as_deref(),
            Some("[\"gareth\" TO \"milan\"]")
        );

        let open = Range {
            from: Some(Scalar::Integer(1)),
            to: None,
        };
        assert_eq!(format(FieldType::Int, open), None);
    }

    #[test]
    fn test_allow_special_characters_skips_quoting() {
        let mapping = FieldMapping::new(FieldType::String).with_special_characters(true);
        let formatter = ValueFormatter::new("tag", mapping);
        assert_eq!(
            formatter.format(&FieldValue::from("ab*")).unwrap().as_deref(),
            Some("ab*")
        );
    }

    #[test]
    fn test_disjunction_helper() {
        assert_eq!(disjunction(vec![]), None);
        assert_eq!(disjunction(vec!["a".to_string()]).as_deref(), Some("a"));
        assert_eq!(
            disjunction(vec!["a".to_string(), "b".to_string(), "c".to_string()]).as_deref(),
            Some("(a OR b OR c)")
        );
    }
}
