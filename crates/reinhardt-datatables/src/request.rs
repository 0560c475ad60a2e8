//! DataTables server-side request parameters
//!
//! The grid widget sends a flat set of parameters with every request. All of
//! them are optional: a missing or unparseable parameter means the
//! corresponding feature was not requested, never an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Offset of the first row to return.
pub const DISPLAY_START: &str = "iDisplayStart";
/// Number of rows to return; `-1` requests every row.
pub const DISPLAY_LENGTH: &str = "iDisplayLength";
/// Correlation token echoed back in the response.
pub const ECHO: &str = "sEcho";
/// Global search term.
pub const SEARCH: &str = "sSearch";
/// Prefix of per-column search terms (`sSearch_<i>`).
pub const COLUMN_SEARCH_PREFIX: &str = "sSearch_";
/// Prefix of sort column offsets (`iSortCol_<i>`).
pub const SORT_COLUMN_PREFIX: &str = "iSortCol_";
/// Prefix of sort directions (`sSortDir_<i>`).
pub const SORT_DIRECTION_PREFIX: &str = "sSortDir_";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Ascending order
	#[default]
	Asc,
	/// Descending order
	Desc,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}

	/// Wire representation, `asc` or `desc`
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	/// Parses a direction leniently: anything other than `desc`
	/// (case-insensitive) is ascending.
	pub fn parse_lenient(s: &str) -> Self {
		s.parse().unwrap_or_default()
	}
}

impl FromStr for SortDirection {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"asc" => Ok(Self::Asc),
			"desc" => Ok(Self::Desc),
			other => Err(format!("invalid sort direction: {}", other)),
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The parameters of one incoming grid request.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{RequestParams, SortDirection};
///
/// let params = RequestParams::from_query_string(
///     "sEcho=3&iDisplayStart=20&iDisplayLength=10&iSortCol_0=1&sSortDir_0=desc",
/// );
/// assert_eq!(params.echo(), 3);
/// assert_eq!(params.display_start(), Some(20));
/// assert_eq!(params.sort_column(0), Some(1));
/// assert_eq!(params.sort_direction(0), SortDirection::Desc);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
	values: HashMap<String, String>,
}

impl RequestParams {
	/// Creates an empty parameter set
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses an `application/x-www-form-urlencoded` string.
	///
	/// Malformed input yields an empty parameter set. Repeated keys keep the
	/// last value.
	pub fn from_query_string(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
			Ok(pairs) => pairs.into_iter().collect(),
			Err(e) => {
				tracing::warn!("Ignoring malformed request query string: {}", e);
				Self::default()
			}
		}
	}

	/// Sets a parameter, returning `self` for chaining
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);
		self
	}

	/// Sets a parameter
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.values.insert(key.into(), value.into());
	}

	/// Raw value of `key`
	pub fn get(&self, key: &str) -> Option<&str> {
		self.values.get(key).map(String::as_str)
	}

	/// Returns true if `key` is present, even with an empty value
	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
		self.get(key).and_then(|v| v.trim().parse().ok())
	}

	fn non_empty(&self, key: &str) -> Option<&str> {
		self.get(key).filter(|v| !v.is_empty())
	}

	/// `iDisplayStart`
	pub fn display_start(&self) -> Option<usize> {
		self.parse(DISPLAY_START)
	}

	/// `iDisplayLength`; negative values (the widget sends `-1`) request every row
	pub fn display_length(&self) -> Option<i64> {
		self.parse(DISPLAY_LENGTH)
	}

	/// `sEcho` coerced to an integer; 0 when absent or not numeric
	pub fn echo(&self) -> i64 {
		self.parse(ECHO).unwrap_or(0)
	}

	/// Non-empty global search term
	pub fn global_search(&self) -> Option<&str> {
		self.non_empty(SEARCH)
	}

	/// Non-empty search term for the visible column at `index`
	pub fn column_search(&self, index: usize) -> Option<&str> {
		self.non_empty(&format!("{}{}", COLUMN_SEARCH_PREFIX, index))
	}

	/// Returns true if the global or any per-column search term is non-empty
	pub fn has_search(&self) -> bool {
		self.values.iter().any(|(key, value)| {
			!value.is_empty()
				&& (key == SEARCH
					|| key
						.strip_prefix(COLUMN_SEARCH_PREFIX)
						.is_some_and(|index| index.parse::<usize>().is_ok()))
		})
	}

	/// Returns true if `iSortCol_<index>` is present
	pub fn has_sort(&self, index: usize) -> bool {
		self.contains(&format!("{}{}", SORT_COLUMN_PREFIX, index))
	}

	/// Column offset of sort priority `index`
	pub fn sort_column(&self, index: usize) -> Option<usize> {
		self.parse(&format!("{}{}", SORT_COLUMN_PREFIX, index))
	}

	/// Direction of sort priority `index`; ascending when absent
	pub fn sort_direction(&self, index: usize) -> SortDirection {
		self.get(&format!("{}{}", SORT_DIRECTION_PREFIX, index))
			.map(SortDirection::parse_lenient)
			.unwrap_or_default()
	}
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl From<HashMap<String, String>> for RequestParams {
	fn from(values: HashMap<String, String>) -> Self {
		Self { values }
	}
}
