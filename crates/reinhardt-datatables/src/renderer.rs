//! Row rendering
//!
//! Rendering a record happens in two steps. Every column's extractor pulls a
//! raw value out of the record, then the value runs through the rendering
//! filter chain together with its column and is turned into a display string.

use crate::column::{Column, ColumnRegistry};
use crate::error::{Result, TableError};
use crate::filter::{EscapeExclusions, FilterChain, RenderFilter, apply_ordered};
use crate::page::RenderedRow;
use crate::value::{Record, Value};
use std::sync::Arc;

/// Extracted, not yet filtered values of one record, in column insertion order.
pub type ExtractedRow = Vec<(String, Value)>;

/// Turns raw records into rendered rows.
#[derive(Debug, Default)]
pub struct RowRenderer {
	filters: FilterChain,
	escape_exclusions: EscapeExclusions,
}

impl RowRenderer {
	/// Creates a renderer without any filter
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs every column's extractor on `record`.
	///
	/// All columns take part, hidden ones included, in insertion order.
	pub fn render(&self, columns: &ColumnRegistry, record: &Record) -> ExtractedRow {
		columns
			.iter()
			.map(|column| (column.name().to_string(), column.extract(record)))
			.collect()
	}

	/// Passes every extracted value through the filter chain.
	///
	/// The value at index `i` belongs to the column at insertion offset `i`.
	///
	/// # Errors
	///
	/// Returns [`TableError::ColumnNotFound`] if `values` holds more entries
	/// than there are columns.
	pub fn apply_filter_chain(
		&self,
		columns: &ColumnRegistry,
		values: ExtractedRow,
	) -> Result<RenderedRow> {
		let filters = self.filters.ordered();
		let columns: Vec<&Column> = columns.iter().collect();
		Self::filter_values(&filters, &columns, values)
	}

	/// Extracts and filters one record.
	pub fn render_row(&self, columns: &ColumnRegistry, record: &Record) -> Result<RenderedRow> {
		self.apply_filter_chain(columns, self.render(columns, record))
	}

	/// Extracts and filters a batch of records, resolving the filter order once.
	pub fn render_rows(&self, columns: &ColumnRegistry, records: &[Record]) -> Result<Vec<RenderedRow>> {
		let filters = self.filters.ordered();
		let ordered: Vec<&Column> = columns.iter().collect();
		records
			.iter()
			.map(|record| Self::filter_values(&filters, &ordered, self.render(columns, record)))
			.collect()
	}

	fn filter_values(
		filters: &[&dyn RenderFilter],
		columns: &[&Column],
		values: ExtractedRow,
	) -> Result<RenderedRow> {
		values
			.into_iter()
			.enumerate()
			.map(|(offset, (name, value))| {
				let column = columns
					.get(offset)
					.ok_or_else(|| TableError::ColumnNotFound(format!("offset {}", offset)))?;
				Ok((name, apply_ordered(filters, value, column).to_string()))
			})
			.collect()
	}

	/// Registers a rendering filter, replacing any filter of the same name
	pub fn set_filter<F>(&mut self, name: impl Into<String>, priority: i32, filter: F)
	where
		F: RenderFilter + 'static,
	{
		self.filters.set(name, priority, filter);
	}

	/// Returns the filter registered under `name`
	pub fn get_filter(&self, name: &str) -> Result<&Arc<dyn RenderFilter>> {
		self.filters.get(name)
	}

	/// Unregisters the filter named `name`
	pub fn remove_filter(&mut self, name: &str) -> Result<Arc<dyn RenderFilter>> {
		self.filters.remove(name)
	}

	/// Filter names in application order
	pub fn filter_names(&self) -> Vec<&str> {
		self.filters.names()
	}

	/// The filter chain
	pub fn filters(&self) -> &FilterChain {
		&self.filters
	}

	/// Columns whose values the escape filter leaves untouched
	pub fn escape_exclusions(&self) -> &EscapeExclusions {
		&self.escape_exclusions
	}

	/// Stops HTML-escaping the column `name`.
	///
	/// The column's content is emitted as raw HTML, so the caller must escape
	/// any untrusted text it contains.
	pub fn exclude_from_escaping(&self, name: impl Into<String>) {
		self.escape_exclusions.insert(name);
	}

	/// Resumes HTML-escaping the column `name`
	pub fn include_in_escaping(&self, name: &str) {
		self.escape_exclusions.remove(name);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::ColumnSpec;
	use crate::filter::{ESCAPE_FILTER_NAME, EscapeFilter};
	use chrono::NaiveDate;

	fn columns() -> ColumnRegistry {
		let mut columns = ColumnRegistry::new();
		columns.add(ColumnSpec::new("id").position(1));
		columns.add(ColumnSpec::new("name").position(0));
		columns.add(ColumnSpec::new("secret").visible(false));
		columns
	}

	fn record() -> Record {
		Record::from([
			("id".to_string(), Value::Integer(5)),
			("name".to_string(), Value::from("<i>Eve</i>")),
			("secret".to_string(), Value::from("s3cr3t")),
		])
	}

	fn escaping_renderer() -> RowRenderer {
		let mut renderer = RowRenderer::new();
		let filter = EscapeFilter::new(renderer.escape_exclusions().clone());
		renderer.set_filter(ESCAPE_FILTER_NAME, 25, filter);
		renderer
	}

	#[test]
	fn test_render_includes_hidden_columns_in_insertion_order() {
		let renderer = RowRenderer::new();
		let extracted = renderer.render(&columns(), &record());
		assert_eq!(
			extracted,
			vec![
				("id".to_string(), Value::Integer(5)),
				("name".to_string(), Value::from("<i>Eve</i>")),
				("secret".to_string(), Value::from("s3cr3t")),
			]
		);
	}

	#[test]
	fn test_render_row_escapes() {
		let renderer = escaping_renderer();
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.names(), vec!["id", "name", "secret"]);
		assert_eq!(row.get("id"), Some("5"));
		assert_eq!(row.get("name"), Some("&lt;i&gt;Eve&lt;/i&gt;"));
	}

	#[test]
	fn test_excluded_column_passes_through() {
		let renderer = escaping_renderer();
		renderer.exclude_from_escaping("name");
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.get("name"), Some("<i>Eve</i>"));

		renderer.include_in_escaping("name");
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.get("name"), Some("&lt;i&gt;Eve&lt;/i&gt;"));
	}

	#[test]
	fn test_filter_receives_matching_column() {
		let mut renderer = RowRenderer::new();
		renderer.set_filter("tag", 0, |value: Value, column: &Column| {
			Value::String(format!("{}={}", column.name(), value))
		});
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.get("id"), Some("id=5"));
		assert_eq!(row.get("secret"), Some("secret=s3cr3t"));
	}

	#[test]
	fn test_filter_runs_before_escape_by_priority() {
		let mut renderer = escaping_renderer();
		renderer.set_filter("bold", 10, |value: Value, column: &Column| {
			if column.name() == "id" {
				Value::String(format!("<b>{}</b>", value))
			} else {
				value
			}
		});
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.get("id"), Some("&lt;b&gt;5&lt;/b&gt;"));
		assert_eq!(renderer.filter_names(), vec!["bold", ESCAPE_FILTER_NAME]);
	}

	#[test]
	fn test_apply_filter_chain_rejects_extra_values() {
		let renderer = RowRenderer::new();
		let mut values = renderer.render(&columns(), &record());
		values.push(("extra".to_string(), Value::Null));
		let result = renderer.apply_filter_chain(&columns(), values);
		assert!(matches!(result, Err(TableError::ColumnNotFound(_))));
	}

	#[test]
	fn test_dates_render_iso8601() {
		let mut columns = ColumnRegistry::new();
		columns.add(ColumnSpec::new("created"));
		let record = Record::from([(
			"created".to_string(),
			Value::from(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()),
		)]);
		let row = escaping_renderer().render_row(&columns, &record).unwrap();
		assert_eq!(row.get("created"), Some("2024-02-20"));
	}

	#[test]
	fn test_remove_escape_filter() {
		let mut renderer = escaping_renderer();
		renderer.remove_filter(ESCAPE_FILTER_NAME).unwrap();
		let row = renderer.render_row(&columns(), &record()).unwrap();
		assert_eq!(row.get("name"), Some("<i>Eve</i>"));
		assert!(matches!(
			renderer.get_filter(ESCAPE_FILTER_NAME),
			Err(TableError::FilterNotFound(_))
		));
	}
}
