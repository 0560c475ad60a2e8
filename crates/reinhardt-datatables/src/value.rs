//! Cell values and raw records
//!
//! A [`Record`] is one raw row as handed out by a data source. Column
//! extractors turn it into a [`Value`], rendering filters transform that value,
//! and its [`Display`](std::fmt::Display) form ends up in the response.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// One raw row: field name to cell value.
pub type Record = HashMap<String, Value>;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Missing or SQL `NULL`; displays as the empty string.
	#[default]
	Null,
	/// Boolean flag.
	Bool(bool),
	/// Signed integer.
	Integer(i64),
	/// Floating point number.
	Float(f64),
	/// Text.
	String(String),
	/// Calendar date, displayed as `YYYY-MM-DD`.
	Date(NaiveDate),
	/// Timestamp with offset, displayed as RFC 3339.
	DateTime(DateTime<FixedOffset>),
}

impl Value {
	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns true for date and date-time values.
	pub fn is_temporal(&self) -> bool {
		matches!(self, Self::Date(_) | Self::DateTime(_))
	}

	/// Returns the text of a [`Value::String`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	/// Converts date and date-time values to their ISO-8601 string form.
	/// Other values are returned unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use chrono::NaiveDate;
	/// use reinhardt_datatables::Value;
	///
	/// let date = Value::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
	/// assert_eq!(date.into_iso8601(), Value::String("2024-03-10".to_string()));
	/// assert_eq!(Value::Integer(7).into_iso8601(), Value::Integer(7));
	/// ```
	pub fn into_iso8601(self) -> Self {
		match self {
			Self::Date(date) => Self::String(date.format("%Y-%m-%d").to_string()),
			Self::DateTime(dt) => Self::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
			other => other,
		}
	}

	/// Orders two values for sorting.
	///
	/// Nulls sort first. Integers and floats compare numerically with each
	/// other; otherwise mismatched kinds fall back to comparing display strings.
	pub fn compare(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Self::Null, Self::Null) => Ordering::Equal,
			(Self::Null, _) => Ordering::Less,
			(_, Self::Null) => Ordering::Greater,
			(Self::Bool(a), Self::Bool(b)) => a.cmp(b),
			(Self::Integer(a), Self::Integer(b)) => a.cmp(b),
			(Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
			(Self::Integer(a), Self::Float(b)) => {
				(*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
			}
			(Self::Float(a), Self::Integer(b)) => {
				a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
			}
			(Self::String(a), Self::String(b)) => a.cmp(b),
			(Self::Date(a), Self::Date(b)) => a.cmp(b),
			(Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
			(a, b) => a.to_string().cmp(&b.to_string()),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => Ok(()),
			Self::Bool(b) => write!(f, "{}", b),
			Self::Integer(i) => write!(f, "{}", i),
			Self::Float(x) => write!(f, "{}", x),
			Self::String(s) => f.write_str(s),
			Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
			Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i32> for Value {
	fn from(i: i32) -> Self {
		Self::Integer(i64::from(i))
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Self::Integer(i)
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Self::Float(x)
	}
}

impl From<NaiveDate> for Value {
	fn from(date: NaiveDate) -> Self {
		Self::Date(date)
	}
}

impl From<DateTime<FixedOffset>> for Value {
	fn from(dt: DateTime<FixedOffset>) -> Self {
		Self::DateTime(dt)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(dt: DateTime<Utc>) -> Self {
		Self::DateTime(dt.fixed_offset())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(opt: Option<T>) -> Self {
		opt.map_or(Self::Null, Into::into)
	}
}

/// Arrays and objects are kept as their compact JSON text.
impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Self::Integer(i),
				None => n.as_f64().map_or(Self::Null, Self::Float),
			},
			serde_json::Value::String(s) => Self::String(s),
			other => Self::String(other.to_string()),
		}
	}
}

/// Builds a [`Record`] from a JSON object. Returns `None` for any other JSON kind.
///
/// # Examples
///
/// ```
/// use reinhardt_datatables::{Value, value::record_from_json};
///
/// let record = record_from_json(serde_json::json!({"id": 1, "name": "Alice"})).unwrap();
/// assert_eq!(record["id"], Value::Integer(1));
/// assert!(record_from_json(serde_json::json!([1, 2])).is_none());
/// ```
pub fn record_from_json(json: serde_json::Value) -> Option<Record> {
	match json {
		serde_json::Value::Object(map) => {
			Some(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
		}
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;

	#[rstest]
	#[case(Value::Null, "")]
	#[case(Value::Bool(true), "true")]
	#[case(Value::Integer(-42), "-42")]
	#[case(Value::Float(2.5), "2.5")]
	#[case(Value::from("plain"), "plain")]
	fn test_display(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(value.to_string(), expected);
	}

	#[test]
	fn test_datetime_iso8601() {
		let dt = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
		let value = Value::from(dt);
		assert!(value.is_temporal());
		assert_eq!(
			value.into_iso8601(),
			Value::String("2024-01-15T09:30:00+00:00".to_string())
		);
	}

	#[test]
	fn test_compare_nulls_first_and_numeric_mix() {
		assert_eq!(Value::Null.compare(&Value::Integer(0)), Ordering::Less);
		assert_eq!(Value::Integer(2).compare(&Value::Float(1.5)), Ordering::Greater);
		assert_eq!(Value::from("b").compare(&Value::from("a")), Ordering::Greater);
	}

	#[test]
	fn test_from_json_nested_kept_as_text() {
		let value = Value::from(serde_json::json!({"a": 1}));
		assert_eq!(value, Value::String(r#"{"a":1}"#.to_string()));
	}
}
