//! The structured forecast extractor.
//!
//! Pure functions over a parsed document and field descriptors; no I/O
//! and no shared state. The pipeline per horizon is: resolve unit
//! placeholders in each selector ([`selector`]), pull one raw column per
//! field ([`fields`]), reconstruct timestamps ([`dates`]), then
//! transpose columns into typed rows ([`rows`]).

pub mod dates;
pub mod fields;
pub mod rows;
pub mod selector;

pub use fields::{ExtractMode, FieldDefault, FieldDescriptor, Value};
pub use rows::ColumnSet;
pub use selector::resolve_units;
