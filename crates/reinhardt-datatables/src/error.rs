//! Error types for the datatables crate.

use thiserror::Error;

/// Errors raised while configuring or rendering a data table.
///
/// Missing or malformed request parameters never produce an error: an absent
/// optional parameter simply means the corresponding feature was not requested.
#[derive(Debug, Error)]
pub enum TableError {
	/// No column with the given name, or the positional offset is out of range.
	#[error("Column not found: {0}")]
	ColumnNotFound(String),

	/// No rendering filter registered under the given name.
	#[error("Filter not found: {0}")]
	FilterNotFound(String),

	/// The data source failed to count or fetch records.
	#[error("Data source error: {0}")]
	DataSource(#[source] Box<dyn std::error::Error + Send + Sync>),

	/// Table options could not be deserialized.
	#[error("Invalid table options: {0}")]
	InvalidOptions(#[from] serde_json::Error),
}

impl TableError {
	/// Wraps an arbitrary data source failure.
	pub fn data_source<E>(error: E) -> Self
	where
		E: Into<Box<dyn std::error::Error + Send + Sync>>,
	{
		Self::DataSource(error.into())
	}
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
