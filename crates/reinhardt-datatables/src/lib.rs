//! Server-side processing for DataTables grid widgets in Reinhardt
//!
//! This crate answers the paged, searchable, sortable requests a DataTables
//! widget sends in server-side processing mode. It translates the request
//! parameters into filter and sort directives on a [`DataSource`], fetches one
//! page of raw records and renders every record into HTML-safe display strings.
//!
//! # Features
//!
//! - **Column Registry**: Named columns with labels, data source fields,
//!   positions, visibility and value extractors
//! - **Request Translation**: `sSearch`, `sSearch_<i>`, `iSortCol_<i>` and
//!   `sSortDir_<i>` become data source directives
//! - **Rendering Filters**: A priority-ordered chain of value filters, with
//!   HTML escaping installed by default
//! - **Response Envelope**: [`PageResult`] serializes with the widget's wire
//!   names (`sEcho`, `iTotalRecords`, `iTotalDisplayRecords`, `aaData`)
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[DataTable] --> B[ColumnRegistry]
//!     A --> C[RowRenderer]
//!     A --> D[RequestTranslator]
//!     C --> E[FilterChain]
//!     E --> F[EscapeFilter]
//!     D --> G[DataSource]
//!     A --> G
//!     A --> H[PageResult]
//! ```
//!
//! # Known limitations
//!
//! A global search term filters on the first visible column only. Searching
//! every visible column at once is not implemented.
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables::{
//!     ColumnSpec, DataTable, InMemoryDataSource, Record, RequestParams, TableOptions, Value,
//! };
//!
//! let mut table = DataTable::new(TableOptions::new("users"));
//! table.add_column(ColumnSpec::new("id").label("ID"));
//! table.add_column(ColumnSpec::new("name").label("Name"));
//!
//! let records = vec![
//!     Record::from([("id".to_string(), Value::Integer(1)), ("name".to_string(), Value::from("Alice"))]),
//!     Record::from([("id".to_string(), Value::Integer(2)), ("name".to_string(), Value::from("Bob"))]),
//! ];
//! let mut source = InMemoryDataSource::new(records);
//!
//! let params = RequestParams::from_query_string("sEcho=4&sSearch_1=bo&iSortCol_0=0&sSortDir_0=desc");
//! let page = table.get_page(&mut source, 0, 10, &params).unwrap();
//!
//! assert_eq!(page.echo, 4);
//! assert_eq!(page.total_records, 1);
//! assert_eq!(page.rows[0].get("name"), Some("Bob"));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod config;
pub mod error;
pub mod filter;
pub mod page;
pub mod renderer;
pub mod request;
pub mod source;
pub mod table;
pub mod translator;
pub mod value;

// Re-exports for convenience
pub use column::{Column, ColumnRegistry, ColumnSpec, ExtractFn, Extractor};
pub use config::{DefaultFilters, TableOptions};
pub use error::{Result, TableError};
pub use filter::{EscapeExclusions, EscapeFilter, FilterChain, RenderFilter, escape_html};
pub use page::{PageResult, RenderedRow};
pub use renderer::{ExtractedRow, RowRenderer};
pub use request::{RequestParams, SortDirection};
pub use source::{DataSource, InMemoryDataSource};
pub use table::DataTable;
pub use translator::RequestTranslator;
pub use value::{Record, Value};
