//! Column resolution for discharge-record tables.
//!
//! Record exports arrive with whatever headers the hospital system uses.
//! This crate maps them onto the [`LogicalField`]s the aggregator needs via
//! configurable alias lists, then converts raw rows into
//! [`rekap_model::PatientRecord`]s.

#![deny(unsafe_code)]

pub mod aliases;
pub mod error;
pub mod extract;
pub mod field;
pub mod resolve;
mod score;

pub use aliases::{FieldAliases, load_aliases};
pub use error::{MappingError, Result};
pub use extract::{Extraction, ExtractionIssues, parse_count};
pub use field::{LogicalField, normalize_column};
pub use resolve::{FieldMapping, FieldResolver};
