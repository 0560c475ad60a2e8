//! Rendered rows and the response envelope

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One rendered row: column name to display string, in column insertion order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRow {
	cells: Vec<(String, String)>,
}

impl RenderedRow {
	/// Creates an empty row
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a cell
	pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.cells.push((name.into(), value.into()));
	}

	/// Display string of the column `name`
	pub fn get(&self, name: &str) -> Option<&str> {
		self.cells
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Cells in column insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.cells.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}

	/// Column names in order
	pub fn names(&self) -> Vec<&str> {
		self.cells.iter().map(|(n, _)| n.as_str()).collect()
	}

	/// Number of cells
	pub fn len(&self) -> usize {
		self.cells.len()
	}

	/// Returns true if the row has no cells
	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenderedRow {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			cells: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl Serialize for RenderedRow {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.cells.len()))?;
		for (name, value) in &self.cells {
			map.serialize_entry(name, value)?;
		}
		map.end()
	}
}

/// One page of rendered rows, serialized with the grid widget's wire names.
///
/// Both counts are taken after the data source applied its filters, so they
/// are always equal.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{PageResult, RenderedRow};
///
/// let row: RenderedRow = [("id", "1"), ("name", "Alice")].into_iter().collect();
/// let page = PageResult::new(7, 1, vec![row]);
/// let json = serde_json::to_string(&page).unwrap();
/// assert_eq!(
///     json,
///     r#"{"sEcho":7,"iTotalRecords":1,"iTotalDisplayRecords":1,"aaData":[{"id":"1","name":"Alice"}]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PageResult {
	/// Echo token copied from the request
	#[serde(rename = "sEcho")]
	pub echo: i64,
	/// Number of records after filtering
	#[serde(rename = "iTotalRecords")]
	pub total_records: usize,
	/// Number of records available for display
	#[serde(rename = "iTotalDisplayRecords")]
	pub total_display_records: usize,
	/// Rendered rows of the requested slice
	#[serde(rename = "aaData")]
	pub rows: Vec<RenderedRow>,
}

impl PageResult {
	/// Creates a page whose total and displayable counts are both `count`
	pub fn new(echo: i64, count: usize, rows: Vec<RenderedRow>) -> Self {
		Self {
			echo,
			total_records: count,
			total_display_records: count,
			rows,
		}
	}
}
