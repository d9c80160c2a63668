//! Literal values carried by query constraints and keyset cursors.

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use uuid::Uuid;

/// A literal operand value.
///
/// This is the closed alphabet of values a provider must understand. Two
/// renderings exist: [`Display`](fmt::Display) is the debugging form used by
/// restriction rendering (strings single-quoted), while
/// [`canonical_text`](Value::canonical_text) is the unquoted form used for
/// cursor key values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(BigDecimal),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    String(String),
}

impl Value {
    /// Whether this value renders as quoted text in restriction output.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Canonical unquoted text form, used for keyset cursor keys.
    ///
    /// Datetimes render as RFC 3339 with UTC offset, numbers as normalized
    /// decimal digits, booleans as `true`/`false`, and `Null` as `null`.
    #[must_use]
    pub fn canonical_text(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.normalized().to_string(),
            Value::Uuid(u) => u.to_string(),
            Value::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Value::Date(d) => d.to_string(),
            Value::Time(t) => t.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Embedded quotes are doubled so the rendered form stays
            // unambiguous to a human reader.
            Value::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            other => f.write_str(&other.canonical_text()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(v.into())
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::Number(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn strings_render_single_quoted() {
        assert_eq!(Value::from("Hibernate").to_string(), "'Hibernate'");
        assert_eq!(Value::from("it's").to_string(), "'it''s'");
    }

    #[test]
    fn non_strings_render_unquoted() {
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn canonical_text_is_unquoted() {
        assert_eq!(Value::from("it's").canonical_text(), "it's");
        assert_eq!(Value::from(7_u32).canonical_text(), "7");
    }

    #[test]
    fn number_canonical_text_is_normalized() {
        let a: Value = BigDecimal::from(5).into();
        let b = Value::Number("5.00".parse().unwrap());
        assert_eq!(a.canonical_text(), b.canonical_text());
    }

    #[test]
    fn datetime_canonical_text_is_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2025-03-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            Value::from(dt).canonical_text(),
            "2025-03-01T08:30:00Z"
        );
    }
}
