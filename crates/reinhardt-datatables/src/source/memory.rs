//! In-memory data source

use super::DataSource;
use crate::error::Result;
use crate::request::SortDirection;
use crate::value::{Record, Value};
use std::cmp::Ordering;

/// A [`DataSource`] over a vector of records.
///
/// Filters match when the field's display string contains the term,
/// ignoring case; all filters must match. Sorts are applied as one compound
/// key in the order they were added, and ties keep the original record order.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::{DataSource, InMemoryDataSource, Record, SortDirection, Value};
///
/// let records: Vec<Record> = ["Charlie", "alice", "Bob"]
///     .into_iter()
///     .map(|name| Record::from([("name".to_string(), Value::from(name))]))
///     .collect();
///
/// let mut source = InMemoryDataSource::new(records);
/// source.add_filter("name", "LI");
/// source.add_sort("name", SortDirection::Asc);
///
/// let items = source.get_items(0, 10).unwrap();
/// assert_eq!(source.count().unwrap(), 2);
/// assert_eq!(items[0]["name"], Value::from("Charlie"));
/// assert_eq!(items[1]["name"], Value::from("alice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
	records: Vec<Record>,
	filters: Vec<(String, String)>,
	sorts: Vec<(String, SortDirection)>,
}

impl InMemoryDataSource {
	/// Creates a source over `records`
	pub fn new(records: Vec<Record>) -> Self {
		Self {
			records,
			..Default::default()
		}
	}

	/// Accumulated filter directives, in the order they were added
	pub fn filters(&self) -> &[(String, String)] {
		&self.filters
	}

	/// Accumulated sort directives, in the order they were added
	pub fn sorts(&self) -> &[(String, SortDirection)] {
		&self.sorts
	}

	/// Drops all filter and sort directives
	pub fn reset(&mut self) {
		self.filters.clear();
		self.sorts.clear();
	}

	fn matches(&self, record: &Record) -> bool {
		self.filters.iter().all(|(field, term)| {
			let needle = term.to_lowercase();
			record
				.get(field)
				.is_some_and(|value| value.to_string().to_lowercase().contains(&needle))
		})
	}

	fn compare(&self, a: &Record, b: &Record) -> Ordering {
		const NULL: Value = Value::Null;
		self.sorts
			.iter()
			.map(|(field, direction)| {
				let ordering = a
					.get(field)
					.unwrap_or(&NULL)
					.compare(b.get(field).unwrap_or(&NULL));
				match direction {
					SortDirection::Asc => ordering,
					SortDirection::Desc => ordering.reverse(),
				}
			})
			.find(|ordering| ordering.is_ne())
			.unwrap_or(Ordering::Equal)
	}

	fn selected(&self) -> Vec<&Record> {
		let mut selected: Vec<&Record> = self.records.iter().filter(|r| self.matches(r)).collect();
		if !self.sorts.is_empty() {
			selected.sort_by(|a, b| self.compare(a, b));
		}
		selected
	}
}

impl DataSource for InMemoryDataSource {
	fn add_filter(&mut self, field: &str, term: &str) {
		self.filters.push((field.to_string(), term.to_string()));
	}

	fn add_sort(&mut self, field: &str, direction: SortDirection) {
		self.sorts.push((field.to_string(), direction));
	}

	fn count(&self) -> Result<usize> {
		Ok(self.records.iter().filter(|r| self.matches(r)).count())
	}

	fn get_items(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
		Ok(self
			.selected()
			.into_iter()
			.skip(offset)
			.take(limit)
			.cloned()
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	fn record(id: i64, name: &str, team: &str) -> Record {
		Record::from([
			("id".to_string(), Value::Integer(id)),
			("name".to_string(), Value::from(name)),
			("team".to_string(), Value::from(team)),
		])
	}

	#[fixture]
	fn source() -> InMemoryDataSource {
		InMemoryDataSource::new(vec![
			record(1, "Alice", "red"),
			record(2, "Bob", "blue"),
			record(3, "Charlie", "red"),
			record(4, "Dana", "blue"),
		])
	}

	fn ids(records: &[Record]) -> Vec<i64> {
		records
			.iter()
			.map(|r| match r["id"] {
				Value::Integer(id) => id,
				_ => panic!("id must be an integer"),
			})
			.collect()
	}

	#[rstest]
	fn test_unfiltered_pagination(source: InMemoryDataSource) {
		assert_eq!(source.count().unwrap(), 4);
		assert_eq!(ids(&source.get_items(1, 2).unwrap()), vec![2, 3]);
		assert_eq!(ids(&source.get_items(3, 10).unwrap()), vec![4]);
		assert!(source.get_items(10, 10).unwrap().is_empty());
	}

	#[rstest]
	fn test_filters_combine(mut source: InMemoryDataSource) {
		source.add_filter("team", "RED");
		source.add_filter("name", "char");
		assert_eq!(source.count().unwrap(), 1);
		assert_eq!(ids(&source.get_items(0, 10).unwrap()), vec![3]);
	}

	#[rstest]
	fn test_filter_on_missing_field_matches_nothing(mut source: InMemoryDataSource) {
		source.add_filter("email", "a");
		assert_eq!(source.count().unwrap(), 0);
	}

	#[rstest]
	fn test_compound_sort(mut source: InMemoryDataSource) {
		source.add_sort("team", SortDirection::Asc);
		source.add_sort("id", SortDirection::Desc);
		assert_eq!(ids(&source.get_items(0, 10).unwrap()), vec![4, 2, 3, 1]);
	}

	#[rstest]
	fn test_reset(mut source: InMemoryDataSource) {
		source.add_filter("team", "blue");
		source.add_sort("id", SortDirection::Desc);
		source.reset();
		assert!(source.filters().is_empty());
		assert!(source.sorts().is_empty());
		assert_eq!(source.count().unwrap(), 4);
	}
}
