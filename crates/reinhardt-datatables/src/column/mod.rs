//! Column definitions and the column registry

pub mod base;
pub mod registry;

pub use base::{Column, ColumnSpec, ExtractFn, Extractor};
pub use registry::ColumnRegistry;
