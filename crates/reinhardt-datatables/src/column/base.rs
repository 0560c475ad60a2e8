//! Column definition and value extraction

use crate::value::{Record, Value};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Callback turning a raw record into a cell value.
pub type ExtractFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// How a column obtains its raw value from a record.
#[derive(Clone, Default)]
pub enum Extractor {
	/// Reads `record[column name]`; dates and date-times become ISO-8601 strings.
	#[default]
	Field,
	/// Returns the same value for every row.
	Literal(Value),
	/// Arbitrary extraction callback.
	Callback(ExtractFn),
}

impl Extractor {
	/// Creates a callback extractor.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datatables::{Extractor, Record, Value};
	///
	/// let full_name = Extractor::callback(|row: &Record| {
	///     let first = row.get("first").cloned().unwrap_or_default();
	///     let last = row.get("last").cloned().unwrap_or_default();
	///     Value::String(format!("{} {}", first, last))
	/// });
	/// ```
	pub fn callback<F>(f: F) -> Self
	where
		F: Fn(&Record) -> Value + Send + Sync + 'static,
	{
		Self::Callback(Arc::new(f))
	}

	/// Creates a literal extractor from a string or integer.
	pub fn literal(value: impl Into<Value>) -> Self {
		Self::Literal(value.into())
	}

	/// Extracts the value for the column named `column_name` from `record`.
	pub fn extract(&self, column_name: &str, record: &Record) -> Value {
		match self {
			Self::Field => record
				.get(column_name)
				.cloned()
				.unwrap_or_default()
				.into_iso8601(),
			Self::Literal(value) => value.clone(),
			Self::Callback(f) => f(record),
		}
	}
}

impl Debug for Extractor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Field => f.write_str("Field"),
			Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
			Self::Callback(_) => f.write_str("Callback(..)"),
		}
	}
}

/// A single table column.
///
/// Columns are created through [`ColumnRegistry::add`](super::ColumnRegistry::add)
/// and afterwards mutated through the setters below.
#[derive(Debug, Clone)]
pub struct Column {
	name: String,
	label: String,
	field: String,
	position: i32,
	visible: bool,
	extractor: Extractor,
}

impl Column {
	pub(crate) fn from_spec(spec: ColumnSpec, default_position: i32) -> Self {
		let ColumnSpec {
			name,
			label,
			field,
			position,
			visible,
			extractor,
		} = spec;
		Self {
			label: label.unwrap_or_else(|| name.clone()),
			field: field.unwrap_or_else(|| name.clone()),
			position: position.unwrap_or(default_position),
			visible: visible.unwrap_or(true),
			extractor: extractor.unwrap_or_default(),
			name,
		}
	}

	/// Overwrites the attributes set in `spec`, leaving the others untouched.
	pub(crate) fn merge(&mut self, spec: ColumnSpec) {
		if let Some(label) = spec.label {
			self.label = label;
		}
		if let Some(field) = spec.field {
			self.field = field;
		}
		if let Some(position) = spec.position {
			self.position = position;
		}
		if let Some(visible) = spec.visible {
			self.visible = visible;
		}
		if let Some(extractor) = spec.extractor {
			self.extractor = extractor;
		}
	}

	/// Unique column name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Header text shown by the widget
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Data source field used for filtering and sorting
	pub fn field(&self) -> &str {
		&self.field
	}

	/// Ordering position, used when every column is visible
	pub fn position(&self) -> i32 {
		self.position
	}

	/// Whether the widget displays this column
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Value extractor
	pub fn extractor(&self) -> &Extractor {
		&self.extractor
	}

	/// Extracts this column's raw value from `record`.
	pub fn extract(&self, record: &Record) -> Value {
		self.extractor.extract(&self.name, record)
	}

	/// Sets the header text
	pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
		self.label = label.into();
		self
	}

	/// Sets the data source field
	pub fn set_field(&mut self, field: impl Into<String>) -> &mut Self {
		self.field = field.into();
		self
	}

	/// Sets the ordering position
	pub fn set_position(&mut self, position: i32) -> &mut Self {
		self.position = position;
		self
	}

	/// Shows or hides the column
	pub fn set_visible(&mut self, visible: bool) -> &mut Self {
		self.visible = visible;
		self
	}

	/// Replaces the extractor
	pub fn set_extractor(&mut self, extractor: Extractor) -> &mut Self {
		self.extractor = extractor;
		self
	}
}

/// Attributes for registering or updating a column.
///
/// Every attribute except the name is optional. When the registry already
/// holds a column with the same name, only the attributes set here are
/// overwritten.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::ColumnSpec;
///
/// let spec = ColumnSpec::new("created_at")
///     .label("Created")
///     .field("users.created_at")
///     .position(3);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnSpec {
	pub(crate) name: String,
	pub(crate) label: Option<String>,
	pub(crate) field: Option<String>,
	pub(crate) position: Option<i32>,
	pub(crate) visible: Option<bool>,
	pub(crate) extractor: Option<Extractor>,
}

impl ColumnSpec {
	/// Starts a spec for the column `name`
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: None,
			field: None,
			position: None,
			visible: None,
			extractor: None,
		}
	}

	/// Sets the header text
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets the data source field
	pub fn field(mut self, field: impl Into<String>) -> Self {
		self.field = Some(field.into());
		self
	}

	/// Sets the ordering position
	pub fn position(mut self, position: i32) -> Self {
		self.position = Some(position);
		self
	}

	/// Sets visibility
	pub fn visible(mut self, visible: bool) -> Self {
		self.visible = Some(visible);
		self
	}

	/// Sets the extractor
	pub fn extractor(mut self, extractor: Extractor) -> Self {
		self.extractor = Some(extractor);
		self
	}

	/// Shorthand for a callback extractor
	pub fn callback<F>(self, f: F) -> Self
	where
		F: Fn(&Record) -> Value + Send + Sync + 'static,
	{
		self.extractor(Extractor::callback(f))
	}

	/// Shorthand for a literal extractor
	pub fn literal(self, value: impl Into<Value>) -> Self {
		self.extractor(Extractor::literal(value))
	}
}
