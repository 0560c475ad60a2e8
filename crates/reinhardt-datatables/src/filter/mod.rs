//! Rendering filters
//!
//! A rendering filter post-processes every extracted cell value before it is
//! written to the response. Filters are registered by name with a priority and
//! run in ascending priority order; filters sharing a priority keep their
//! registration order.

pub mod escape;

pub use escape::{
	ESCAPE_FILTER_NAME, ESCAPE_FILTER_PRIORITY, EscapeExclusions, EscapeFilter, escape_html,
};

use crate::column::Column;
use crate::error::{Result, TableError};
use crate::value::Value;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Transforms a cell value of the given column.
pub trait RenderFilter: Send + Sync {
	/// Returns the transformed value, or `value` unchanged.
	fn apply(&self, value: Value, column: &Column) -> Value;
}

impl<F> RenderFilter for F
where
	F: Fn(Value, &Column) -> Value + Send + Sync,
{
	fn apply(&self, value: Value, column: &Column) -> Value {
		self(value, column)
	}
}

struct FilterEntry {
	name: String,
	priority: i32,
	filter: Arc<dyn RenderFilter>,
}

/// Memoized application order, recomputed only after the chain changed.
struct ChainOrder {
	dirty: bool,
	indices: Arc<Vec<usize>>,
}

/// Named, priority-ordered pipeline of rendering filters.
pub struct FilterChain {
	entries: Vec<FilterEntry>,
	order: Mutex<ChainOrder>,
}

impl Default for FilterChain {
	fn default() -> Self {
		Self::new()
	}
}

impl FilterChain {
	/// Creates an empty chain
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			order: Mutex::new(ChainOrder {
				dirty: false,
				indices: Arc::new(Vec::new()),
			}),
		}
	}

	/// Registers `filter` under `name`, replacing any filter of the same name.
	///
	/// # Example
	///
	/// ```rust
	/// use reinhardt_datatables::{Column, FilterChain, Value};
	///
	/// let mut chain = FilterChain::new();
	/// chain.set("trim", 10, |value: Value, _: &Column| match value {
	///     Value::String(s) => Value::String(s.trim().to_string()),
	///     other => other,
	/// });
	/// assert!(chain.contains("trim"));
	/// ```
	pub fn set<F>(&mut self, name: impl Into<String>, priority: i32, filter: F)
	where
		F: RenderFilter + 'static,
	{
		self.set_arc(name, priority, Arc::new(filter));
	}

	/// Registers an already shared filter under `name`.
	pub fn set_arc(&mut self, name: impl Into<String>, priority: i32, filter: Arc<dyn RenderFilter>) {
		let name = name.into();
		match self.entries.iter_mut().find(|e| e.name == name) {
			Some(entry) => {
				entry.priority = priority;
				entry.filter = filter;
			}
			None => self.entries.push(FilterEntry {
				name,
				priority,
				filter,
			}),
		}
		self.invalidate();
	}

	/// Returns the filter registered under `name`.
	pub fn get(&self, name: &str) -> Result<&Arc<dyn RenderFilter>> {
		self.entry(name).map(|e| &e.filter)
	}

	/// Returns the priority of the filter registered under `name`.
	pub fn priority(&self, name: &str) -> Result<i32> {
		self.entry(name).map(|e| e.priority)
	}

	/// Unregisters the filter named `name`.
	pub fn remove(&mut self, name: &str) -> Result<Arc<dyn RenderFilter>> {
		let index = self
			.entries
			.iter()
			.position(|e| e.name == name)
			.ok_or_else(|| TableError::FilterNotFound(name.to_string()))?;
		let entry = self.entries.remove(index);
		self.invalidate();
		Ok(entry.filter)
	}

	/// Returns true if a filter named `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|e| e.name == name)
	}

	/// Number of registered filters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no filter is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Removes every filter.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.invalidate();
	}

	/// Filter names in application order.
	pub fn names(&self) -> Vec<&str> {
		self.ordered_indices()
			.iter()
			.map(|&i| self.entries[i].name.as_str())
			.collect()
	}

	/// Filters in application order.
	pub fn ordered(&self) -> Vec<&dyn RenderFilter> {
		self.ordered_indices()
			.iter()
			.map(|&i| self.entries[i].filter.as_ref())
			.collect()
	}

	/// Passes `value` through every filter in application order.
	pub fn apply(&self, value: Value, column: &Column) -> Value {
		apply_ordered(&self.ordered(), value, column)
	}

	fn entry(&self, name: &str) -> Result<&FilterEntry> {
		self.entries
			.iter()
			.find(|e| e.name == name)
			.ok_or_else(|| TableError::FilterNotFound(name.to_string()))
	}

	fn invalidate(&mut self) {
		self.order.get_mut().dirty = true;
	}

	fn ordered_indices(&self) -> Arc<Vec<usize>> {
		let mut order = self.order.lock();
		if order.dirty {
			let mut indices: Vec<usize> = (0..self.entries.len()).collect();
			indices.sort_by_key(|&i| self.entries[i].priority);
			tracing::trace!(
				filters = ?indices.iter().map(|&i| self.entries[i].name.as_str()).collect::<Vec<_>>(),
				"Re-sorted rendering filter chain"
			);
			order.indices = Arc::new(indices);
			order.dirty = false;
		}
		Arc::clone(&order.indices)
	}
}

pub(crate) fn apply_ordered(filters: &[&dyn RenderFilter], value: Value, column: &Column) -> Value {
	filters
		.iter()
		.fold(value, |value, filter| filter.apply(value, column))
}

impl fmt::Debug for FilterChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterChain")
			.field(
				"filters",
				&self
					.entries
					.iter()
					.map(|e| (e.name.as_str(), e.priority))
					.collect::<Vec<_>>(),
			)
			.finish_non_exhaustive()
	}
}
