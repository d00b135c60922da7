//! File input and output.
//!
//! Discharge-record exports and report templates are read from CSV into
//! model types; aggregated rows are written back out in template order
//! followed by the report's count columns.

#![deny(unsafe_code)]

pub mod error;
pub mod reader;
pub mod template;
pub mod writer;

pub use error::{IngestError, Result};
pub use reader::read_record_table;
pub use template::{TEMPLATE_CODE_ALIASES, read_template, read_template_with};
pub use writer::{write_report, write_report_to};
