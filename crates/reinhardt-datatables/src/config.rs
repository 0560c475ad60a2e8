//! Table configuration

use crate::error::Result;
use crate::filter::{ESCAPE_FILTER_NAME, ESCAPE_FILTER_PRIORITY, EscapeFilter};
use crate::renderer::RowRenderer;
use serde::{Deserialize, Serialize};

fn default_id() -> String {
	"datatable".to_string()
}

fn default_page_length() -> usize {
	10
}

fn default_true() -> bool {
	true
}

fn default_escape_priority() -> i32 {
	ESCAPE_FILTER_PRIORITY
}

/// Rendering filters installed when a table is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultFilters {
	/// Install the HTML escape filter
	#[serde(default = "default_true")]
	pub escape: bool,

	/// Priority of the escape filter
	#[serde(default = "default_escape_priority")]
	pub escape_priority: i32,
}

impl Default for DefaultFilters {
	fn default() -> Self {
		Self {
			escape: true,
			escape_priority: ESCAPE_FILTER_PRIORITY,
		}
	}
}

impl DefaultFilters {
	/// No default filters at all
	pub fn none() -> Self {
		Self {
			escape: false,
			..Self::default()
		}
	}

	pub(crate) fn install(&self, renderer: &mut RowRenderer) {
		if self.escape {
			let filter = EscapeFilter::new(renderer.escape_exclusions().clone());
			renderer.set_filter(ESCAPE_FILTER_NAME, self.escape_priority, filter);
		}
	}
}

/// Per-instance table options.
///
/// Options the adapter does not interpret itself (widget presentation
/// settings such as `bPaginate` or `sDom`) are kept in `extra` and handed to
/// the view layer unchanged.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::TableOptions;
///
/// let options = TableOptions::from_json(
///     r#"{"id": "users", "page_length": 25, "bStateSave": true}"#,
/// )
/// .unwrap();
/// assert_eq!(options.id, "users");
/// assert_eq!(options.page_length, 25);
/// assert_eq!(options.option("bStateSave"), Some(&serde_json::Value::Bool(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOptions {
	/// Instance identifier, e.g. the DOM id of the widget
	#[serde(default = "default_id")]
	pub id: String,

	/// Rows per page when the request does not say otherwise
	#[serde(default = "default_page_length")]
	pub page_length: usize,

	/// Total row count announced before the first request (deferred loading)
	#[serde(default)]
	pub defer_loading: Option<usize>,

	/// Filters installed at construction
	#[serde(default)]
	pub default_filters: DefaultFilters,

	/// Arbitrary presentation options
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for TableOptions {
	fn default() -> Self {
		Self {
			id: default_id(),
			page_length: default_page_length(),
			defer_loading: None,
			default_filters: DefaultFilters::default(),
			extra: serde_json::Map::new(),
		}
	}
}

impl TableOptions {
	/// Creates options for the instance `id`
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}

	/// Parses options from JSON.
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidOptions`](crate::TableError::InvalidOptions)
	/// if the JSON is malformed or a known option has the wrong type.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Sets the default page length
	pub fn page_length(mut self, page_length: usize) -> Self {
		self.page_length = page_length;
		self
	}

	/// Enables deferred loading with the given initial row count
	pub fn defer_loading(mut self, count: usize) -> Self {
		self.defer_loading = Some(count);
		self
	}

	/// Replaces the default filters
	pub fn default_filters(mut self, filters: DefaultFilters) -> Self {
		self.default_filters = filters;
		self
	}

	/// Sets a presentation option
	pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Returns a presentation option
	pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
		self.extra.get(key)
	}
}
