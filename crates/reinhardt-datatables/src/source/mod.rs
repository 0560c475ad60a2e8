//! Data source abstraction
//!
//! A data source accumulates filter and sort directives and then answers
//! `count` and `get_items` with those directives applied. How it does so (SQL,
//! an ORM queryset, an in-memory vector) is up to the implementation.

pub mod memory;

pub use memory::InMemoryDataSource;

use crate::error::Result;
use crate::request::SortDirection;
use crate::value::Record;

/// Provider of filtered, sorted and paginated raw records.
pub trait DataSource {
	/// Restricts the records to those whose `field` matches `term`.
	fn add_filter(&mut self, field: &str, term: &str);

	/// Appends a sort key. Earlier directives take precedence over later ones.
	fn add_sort(&mut self, field: &str, direction: SortDirection);

	/// Number of records left after filtering.
	fn count(&self) -> Result<usize>;

	/// Records `[offset, offset + limit)` after filtering and sorting.
	fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Record>>;
}

impl<D: DataSource + ?Sized> DataSource for &mut D {
	fn add_filter(&mut self, field: &str, term: &str) {
		(**self).add_filter(field, term);
	}

	fn add_sort(&mut self, field: &str, direction: SortDirection) {
		(**self).add_sort(field, direction);
	}

	fn count(&self) -> Result<usize> {
		(**self).count()
	}

	fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
		(**self).get_items(offset, limit)
	}
}

impl<D: DataSource + ?Sized> DataSource for Box<D> {
	fn add_filter(&mut self, field: &str, term: &str) {
		(**self).add_filter(field, term);
	}

	fn add_sort(&mut self, field: &str, direction: SortDirection) {
		(**self).add_sort(field, direction);
	}

	fn count(&self) -> Result<usize> {
		(**self).count()
	}

	fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
		(**self).get_items(offset, limit)
	}
}
