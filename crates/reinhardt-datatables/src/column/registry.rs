//! Ordered, named collection of columns

use super::base::{Column, ColumnSpec};
use crate::error::{Result, TableError};
use std::collections::BTreeSet;

/// The column definitions of one table instance.
///
/// Columns are stored in insertion order. Most accessors return them in the
/// *resolved* order instead, which depends on visibility:
///
/// - If at least one column is hidden, hidden columns come first (insertion
///   order) followed by visible columns (insertion order). Positions are
///   ignored.
/// - If every column is visible, columns are sorted by position, then by name.
///
/// Request parameters address columns by their offset in the resolved order,
/// so this rule must match what the grid widget expects.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
	columns: Vec<Column>,
}

impl ColumnRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a column, or merges `spec` into the existing column of the same name.
	///
	/// A new column without an explicit position gets its insertion rank.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datatables::{ColumnRegistry, ColumnSpec};
	///
	/// let mut registry = ColumnRegistry::new();
	/// registry.add(ColumnSpec::new("name").label("Name"));
	/// registry.add(ColumnSpec::new("name").visible(false));
	///
	/// let column = registry.get("name").unwrap();
	/// assert_eq!(column.label(), "Name");
	/// assert!(!column.is_visible());
	/// ```
	pub fn add(&mut self, spec: ColumnSpec) -> &mut Column {
		let index = match self.columns.iter().position(|c| c.name() == spec.name) {
			Some(index) => {
				self.columns[index].merge(spec);
				index
			}
			None => {
				let rank = i32::try_from(self.columns.len()).unwrap_or(i32::MAX);
				self.columns.push(Column::from_spec(spec, rank));
				self.columns.len() - 1
			}
		};
		&mut self.columns[index]
	}

	/// Returns the column named `name`.
	pub fn get(&self, name: &str) -> Result<&Column> {
		self.columns
			.iter()
			.find(|c| c.name() == name)
			.ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
	}

	/// Returns the column named `name` for modification.
	pub fn get_mut(&mut self, name: &str) -> Result<&mut Column> {
		self.columns
			.iter_mut()
			.find(|c| c.name() == name)
			.ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
	}

	/// Returns the column at `offset` in the resolved order.
	pub fn get_by_offset(&self, offset: usize) -> Result<&Column> {
		self.all()
			.get(offset)
			.copied()
			.ok_or_else(|| TableError::ColumnNotFound(format!("offset {}", offset)))
	}

	/// Every column in the resolved order.
	pub fn all(&self) -> Vec<&Column> {
		let visible_count = self.columns.iter().filter(|c| c.is_visible()).count();

		if visible_count < self.columns.len() {
			let (visible, hidden): (Vec<&Column>, Vec<&Column>) =
				self.columns.iter().partition(|c| c.is_visible());
			hidden.into_iter().chain(visible).collect()
		} else {
			let mut ordered: Vec<&Column> = self.columns.iter().collect();
			ordered.sort_by(|a, b| {
				a.position()
					.cmp(&b.position())
					.then_with(|| a.name().cmp(b.name()))
			});
			ordered
		}
	}

	/// Visible columns in the resolved order.
	pub fn visible(&self) -> Vec<&Column> {
		self.all().into_iter().filter(|c| c.is_visible()).collect()
	}

	/// Hidden columns in the resolved order.
	pub fn hidden(&self) -> Vec<&Column> {
		self.all().into_iter().filter(|c| !c.is_visible()).collect()
	}

	/// Every column in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Column> {
		self.columns.iter()
	}

	/// Names of all registered columns.
	pub fn keys(&self) -> BTreeSet<&str> {
		self.columns.iter().map(Column::name).collect()
	}

	/// Returns true if a column named `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.columns.iter().any(|c| c.name() == name)
	}

	/// Number of registered columns.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Returns true if no column is registered.
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Removes every column.
	pub fn clear(&mut self) {
		self.columns.clear();
	}
}
