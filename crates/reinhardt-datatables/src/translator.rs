//! Translation of request parameters into data source directives

use crate::column::ColumnRegistry;
use crate::error::Result;
use crate::request::RequestParams;
use crate::source::DataSource;

/// Applies the search and sort parameters of a request to a data source.
///
/// The translator only records directives on the source; it never runs the
/// query itself.
#[derive(Debug, Clone, Copy)]
pub struct RequestTranslator<'a> {
	columns: &'a ColumnRegistry,
}

impl<'a> RequestTranslator<'a> {
	/// Creates a translator resolving columns against `columns`
	pub fn new(columns: &'a ColumnRegistry) -> Self {
		Self { columns }
	}

	/// Adds filter directives for the request's search terms.
	///
	/// A non-empty global search term (`sSearch`) filters on the field of the
	/// first visible column only; searching across every visible column is not
	/// supported. Without a global term, each non-empty `sSearch_<i>` filters on
	/// the field of the visible column at index `i`.
	pub fn apply_filters<D>(&self, params: &RequestParams, source: &mut D)
	where
		D: DataSource + ?Sized,
	{
		let visible = self.columns.visible();

		if let Some(term) = params.global_search() {
			if let Some(column) = visible.first() {
				tracing::debug!(field = column.field(), term, "Applying global search filter");
				source.add_filter(column.field(), term);
			}
			return;
		}

		for (index, column) in visible.iter().enumerate() {
			if let Some(term) = params.column_search(index) {
				tracing::debug!(
					index,
					field = column.field(),
					term,
					"Applying column search filter"
				);
				source.add_filter(column.field(), term);
			}
		}
	}

	/// Adds sort directives for every `iSortCol_<i>` parameter.
	///
	/// `i` runs over the visible column indices; the parameter's value is a
	/// column offset resolved with [`ColumnRegistry::get_by_offset`]. Directives
	/// are added in index order.
	///
	/// # Errors
	///
	/// Returns [`TableError::ColumnNotFound`](crate::TableError::ColumnNotFound)
	/// when a sort parameter names an offset past the last column.
	pub fn apply_sorts<D>(&self, params: &RequestParams, source: &mut D) -> Result<()>
	where
		D: DataSource + ?Sized,
	{
		for index in 0..self.columns.visible().len() {
			if !params.has_sort(index) {
				continue;
			}
			let Some(offset) = params.sort_column(index) else {
				tracing::warn!(index, "Ignoring non-numeric sort column parameter");
				continue;
			};
			let column = self.columns.get_by_offset(offset)?;
			let direction = params.sort_direction(index);
			tracing::debug!(
				index,
				offset,
				field = column.field(),
				%direction,
				"Applying sort"
			);
			source.add_sort(column.field(), direction);
		}
		Ok(())
	}
}
