//! HTML escaping filter
//!
//! Escaped characters:
//! - `&` → `&amp;`
//! - `<` → `&lt;`
//! - `>` → `&gt;`
//! - `"` → `&quot;`
//! - `'` → `&#x27;`
//!
//! Columns listed in [`EscapeExclusions`] are passed through untouched. Their
//! content ends up in the page as raw HTML, so whoever produces it is
//! responsible for escaping any user-provided text it contains.

use super::RenderFilter;
use crate::column::Column;
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Name under which the escape filter is registered.
pub const ESCAPE_FILTER_NAME: &str = "escape";

/// Default priority of the escape filter.
pub const ESCAPE_FILTER_PRIORITY: i32 = 25;

/// Escape HTML special characters
///
/// # Examples
///
/// ```
/// use reinhardt_datatables::filter::escape_html;
///
/// assert_eq!(escape_html("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");
/// assert_eq!(escape_html("5 < 10 & 10 > 5"), "5 &lt; 10 &amp; 10 &gt; 5");
/// assert_eq!(escape_html("it's"), "it&#x27;s");
/// ```
pub fn escape_html(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}

/// Shared set of column names the escape filter skips.
///
/// Cloning the handle shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct EscapeExclusions {
	names: Arc<RwLock<BTreeSet<String>>>,
}

impl EscapeExclusions {
	/// Creates an empty exclusion set
	pub fn new() -> Self {
		Self::default()
	}

	/// Stops escaping the column `name`
	pub fn insert(&self, name: impl Into<String>) -> bool {
		self.names.write().insert(name.into())
	}

	/// Resumes escaping the column `name`
	pub fn remove(&self, name: &str) -> bool {
		self.names.write().remove(name)
	}

	/// Returns true if the column `name` is not escaped
	pub fn contains(&self, name: &str) -> bool {
		self.names.read().contains(name)
	}

	/// Names of all excluded columns, sorted
	pub fn names(&self) -> Vec<String> {
		self.names.read().iter().cloned().collect()
	}
}

/// HTML-escapes string values of every column not listed in its exclusions.
#[derive(Debug, Clone, Default)]
pub struct EscapeFilter {
	exclusions: EscapeExclusions,
}

impl EscapeFilter {
	/// Creates an escape filter reading the given exclusion set
	pub fn new(exclusions: EscapeExclusions) -> Self {
		Self { exclusions }
	}
}

impl RenderFilter for EscapeFilter {
	fn apply(&self, value: Value, column: &Column) -> Value {
		match value {
			Value::String(text) if !self.exclusions.contains(column.name()) => {
				Value::String(escape_html(&text))
			}
			other => other,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{ColumnRegistry, ColumnSpec};

	#[test]
	fn test_escape_filter_respects_exclusions() {
		let mut registry = ColumnRegistry::new();
		registry.add(ColumnSpec::new("bio"));
		registry.add(ColumnSpec::new("actions"));

		let exclusions = EscapeExclusions::new();
		exclusions.insert("actions");
		let filter = EscapeFilter::new(exclusions.clone());

		let bio = registry.get("bio").unwrap();
		let actions = registry.get("actions").unwrap();

		assert_eq!(
			filter.apply(Value::from("<b>x</b>"), bio),
			Value::from("&lt;b&gt;x&lt;/b&gt;")
		);
		assert_eq!(
			filter.apply(Value::from("<b>x</b>"), actions),
			Value::from("<b>x</b>")
		);

		exclusions.remove("actions");
		assert_eq!(
			filter.apply(Value::from("<a>"), actions),
			Value::from("&lt;a&gt;")
		);
	}

	#[test]
	fn test_escape_filter_ignores_non_strings() {
		let mut registry = ColumnRegistry::new();
		registry.add(ColumnSpec::new("count"));
		let filter = EscapeFilter::default();
		let column = registry.get("count").unwrap();
		assert_eq!(filter.apply(Value::Integer(3), column), Value::Integer(3));
	}
}
