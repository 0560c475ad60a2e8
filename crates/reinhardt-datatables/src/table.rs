//! The data table adapter

use crate::column::{Column, ColumnRegistry, ColumnSpec};
use crate::config::TableOptions;
use crate::error::Result;
use crate::filter::RenderFilter;
use crate::page::PageResult;
use crate::renderer::RowRenderer;
use crate::request::RequestParams;
use crate::source::DataSource;
use crate::translator::RequestTranslator;
use std::sync::Arc;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Server-side processing adapter for one grid widget instance.
///
/// A `DataTable` owns the column registry and the rendering filter chain. It
/// is configured once and then answers page requests against any
/// [`DataSource`].
///
/// # Architecture
///
/// ```mermaid
/// graph LR
///     Request["RequestParams"] --> Translator["RequestTranslator"]
///     Translator -->|add_filter / add_sort| Source["DataSource"]
///     Source -->|count / get_items| Assembler["DataTable::get_page"]
///     Assembler --> Renderer["RowRenderer"]
///     Registry["ColumnRegistry"] --> Translator
///     Registry --> Renderer
///     Renderer --> Page["PageResult"]
/// ```
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{
///     ColumnSpec, DataTable, InMemoryDataSource, Record, RequestParams, TableOptions, Value,
/// };
///
/// let mut table = DataTable::new(TableOptions::new("users"));
/// table.add_column(ColumnSpec::new("id").label("ID"));
/// table.add_column(ColumnSpec::new("name").label("Name"));
///
/// let mut source = InMemoryDataSource::new(vec![Record::from([
///     ("id".to_string(), Value::Integer(1)),
///     ("name".to_string(), Value::from("<Alice>")),
/// ])]);
///
/// let params = RequestParams::from_query_string("sEcho=1&iDisplayStart=0&iDisplayLength=10");
/// let page = table.get_page_for_request(&mut source, &params).unwrap();
/// assert_eq!(page.total_records, 1);
/// assert_eq!(page.rows[0].get("name"), Some("&lt;Alice&gt;"));
/// ```
#[derive(Debug)]
pub struct DataTable {
	options: TableOptions,
	columns: ColumnRegistry,
	renderer: RowRenderer,
}

impl Default for DataTable {
	fn default() -> Self {
		Self::new(TableOptions::default())
	}
}

impl DataTable {
	/// Creates a table and installs the default filters named in `options`
	pub fn new(options: TableOptions) -> Self {
		let mut renderer = RowRenderer::new();
		options.default_filters.install(&mut renderer);
		tracing::debug!(
			id = %options.id,
			filters = ?renderer.filter_names(),
			"Created data table"
		);
		Self {
			options,
			columns: ColumnRegistry::new(),
			renderer,
		}
	}

	/// Instance identifier
	pub fn id(&self) -> &str {
		&self.options.id
	}

	/// Table options
	pub fn options(&self) -> &TableOptions {
		&self.options
	}

	/// Mutable table options.
	///
	/// Changing `default_filters` here has no effect; they are installed once
	/// by [`DataTable::new`].
	pub fn options_mut(&mut self) -> &mut TableOptions {
		&mut self.options
	}

	/// Column registry
	pub fn columns(&self) -> &ColumnRegistry {
		&self.columns
	}

	/// Mutable column registry
	pub fn columns_mut(&mut self) -> &mut ColumnRegistry {
		&mut self.columns
	}

	/// Registers or merges a column
	pub fn add_column(&mut self, spec: ColumnSpec) -> &mut Column {
		self.columns.add(spec)
	}

	/// Returns the column named `name`
	pub fn column(&self, name: &str) -> Result<&Column> {
		self.columns.get(name)
	}

	/// Row renderer
	pub fn renderer(&self) -> &RowRenderer {
		&self.renderer
	}

	/// Registers a rendering filter, replacing any filter of the same name
	pub fn set_filter<F>(&mut self, name: impl Into<String>, priority: i32, filter: F)
	where
		F: RenderFilter + 'static,
	{
		self.renderer.set_filter(name, priority, filter);
	}

	/// Returns the rendering filter registered under `name`
	pub fn get_filter(&self, name: &str) -> Result<&Arc<dyn RenderFilter>> {
		self.renderer.get_filter(name)
	}

	/// Unregisters the rendering filter named `name`
	pub fn remove_filter(&mut self, name: &str) -> Result<Arc<dyn RenderFilter>> {
		self.renderer.remove_filter(name)
	}

	/// Stops HTML-escaping the given columns.
	///
	/// Their content is emitted as raw HTML; escaping any untrusted text in it
	/// is the caller's job.
	pub fn exclude_from_escaping<I, S>(&self, names: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for name in names {
			self.renderer.exclude_from_escaping(name);
		}
	}

	/// Translator bound to this table's columns
	pub fn translator(&self) -> RequestTranslator<'_> {
		RequestTranslator::new(&self.columns)
	}

	/// Produces the page `[offset, offset + limit)` for a request.
	///
	/// Search parameters add filter directives to `source`, an `iSortCol_0`
	/// parameter adds sort directives, then the source is counted and sliced
	/// and every returned record is rendered.
	///
	/// # Errors
	///
	/// Propagates [`TableError::ColumnNotFound`](crate::TableError::ColumnNotFound)
	/// from sort resolution and any error reported by the data source.
	pub fn get_page<D>(
		&self,
		source: &mut D,
		offset: usize,
		limit: usize,
		params: &RequestParams,
	) -> Result<PageResult>
	where
		D: DataSource + ?Sized,
	{
		let translator = self.translator();
		if params.has_search() {
			translator.apply_filters(params, source);
		}
		if params.has_sort(0) {
			translator.apply_sorts(params, source)?;
		}

		let count = source.count()?;
		let records = source.get_items(offset, limit)?;
		let rows = self.renderer.render_rows(&self.columns, &records)?;

		tracing::debug!(
			id = %self.options.id,
			offset,
			limit,
			count,
			rendered = rows.len(),
			"Assembled data table page"
		);

		Ok(PageResult::new(params.echo(), count, rows))
	}

	/// Produces the page described by the request's own pagination parameters.
	///
	/// `iDisplayStart` defaults to 0 and `iDisplayLength` to the configured
	/// page length. A negative length (the widget sends `-1` for "All")
	/// returns every remaining row.
	pub fn get_page_for_request<D>(&self, source: &mut D, params: &RequestParams) -> Result<PageResult>
	where
		D: DataSource + ?Sized,
	{
		let offset = params.display_start().unwrap_or(0);
		let limit = match params.display_length() {
			Some(length) if length < 0 => usize::MAX,
			Some(length) => usize::try_from(length).unwrap_or(usize::MAX),
			None => self.options.page_length,
		};
		self.get_page(source, offset, limit, params)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::DefaultFilters;
	use crate::error::TableError;
	use crate::filter::ESCAPE_FILTER_NAME;
	use crate::source::InMemoryDataSource;
	use crate::value::{Record, Value};
	use rstest::*;

	#[fixture]
	fn table() -> DataTable {
		let mut table = DataTable::new(TableOptions::new("people").page_length(2));
		table.add_column(ColumnSpec::new("id"));
		table.add_column(ColumnSpec::new("name"));
		table
	}

	#[fixture]
	fn source() -> InMemoryDataSource {
		InMemoryDataSource::new(
			["Alice", "Bob", "Charlie"]
				.into_iter()
				.enumerate()
				.map(|(i, name)| {
					Record::from([
						("id".to_string(), Value::Integer(i as i64 + 1)),
						("name".to_string(), Value::from(name)),
					])
				})
				.collect(),
		)
	}

	#[rstest]
	fn test_default_filters_installed(table: DataTable) {
		assert!(table.get_filter(ESCAPE_FILTER_NAME).is_ok());
		assert_eq!(table.id(), "people");

		let bare = DataTable::new(TableOptions::default().default_filters(DefaultFilters::none()));
		assert!(matches!(
			bare.get_filter(ESCAPE_FILTER_NAME),
			Err(TableError::FilterNotFound(_))
		));
	}

	#[rstest]
	fn test_page_without_parameters(table: DataTable, mut source: InMemoryDataSource) {
		let page = table
			.get_page(&mut source, 1, 5, &RequestParams::new())
			.unwrap();
		assert_eq!(page.echo, 0);
		assert_eq!(page.total_records, 3);
		assert_eq!(page.total_display_records, 3);
		assert_eq!(page.rows.len(), 2);
		assert_eq!(page.rows[0].get("name"), Some("Bob"));
		assert!(source.filters().is_empty());
		assert!(source.sorts().is_empty());
	}

	#[rstest]
	fn test_sort_requires_first_sort_parameter(table: DataTable, mut source: InMemoryDataSource) {
		let params = RequestParams::new().with("iSortCol_1", "1");
		table.get_page(&mut source, 0, 10, &params).unwrap();
		assert!(source.sorts().is_empty());
	}

	#[rstest]
	fn test_page_length_defaults(table: DataTable, mut source: InMemoryDataSource) {
		let page = table
			.get_page_for_request(&mut source, &RequestParams::new())
			.unwrap();
		assert_eq!(page.rows.len(), 2);

		let params = RequestParams::new().with("iDisplayLength", "-1");
		let page = table.get_page_for_request(&mut source, &params).unwrap();
		assert_eq!(page.rows.len(), 3);

		let params = RequestParams::new()
			.with("iDisplayStart", "2")
			.with("iDisplayLength", "10");
		let page = table.get_page_for_request(&mut source, &params).unwrap();
		assert_eq!(page.rows.len(), 1);
		assert_eq!(page.rows[0].get("id"), Some("3"));
	}
}
