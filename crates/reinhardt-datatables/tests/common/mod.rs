//! Common test fixtures for reinhardt-datatables tests

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use reinhardt_datatables::{ColumnSpec, DataTable, InMemoryDataSource, Record, TableOptions, Value};
use rstest::*;

/// Builds a user record
pub fn user(id: i64, name: &str, email: &str, created: (i32, u32, u32)) -> Record {
	let (y, m, d) = created;
	Record::from([
		("id".to_string(), Value::Integer(id)),
		("name".to_string(), Value::from(name)),
		("email".to_string(), Value::from(email)),
		(
			"created".to_string(),
			Value::from(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
		),
	])
}

/// Fixture providing sample user records
#[fixture]
pub fn sample_users() -> Vec<Record> {
	vec![
		user(1, "Alice <admin>", "alice@example.com", (2024, 1, 15)),
		user(2, "Bob & Co", "bob@example.com", (2024, 2, 20)),
		user(3, "Charlie", "charlie@example.org", (2024, 3, 10)),
	]
}

/// Fixture providing an in-memory source over the sample users
#[fixture]
pub fn user_source(sample_users: Vec<Record>) -> InMemoryDataSource {
	InMemoryDataSource::new(sample_users)
}

/// Fixture providing a table with id, name, email and created columns
#[fixture]
pub fn user_table() -> DataTable {
	let mut table = DataTable::new(TableOptions::new("users").page_length(2));
	table.add_column(ColumnSpec::new("id").label("ID"));
	table.add_column(ColumnSpec::new("name").label("Name"));
	table.add_column(ColumnSpec::new("email").label("Email"));
	table.add_column(ColumnSpec::new("created").label("Created"));
	table
}
