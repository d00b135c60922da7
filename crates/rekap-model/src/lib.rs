//! Data model for morbidity report recapitulation.
//!
//! Report templates list diagnosis-code expressions, one per row. Patient
//! discharge records are joined against the expanded codes and counted into
//! the fixed column taxonomies defined in [`taxonomy`].

#![deny(unsafe_code)]

pub mod code;
pub mod error;
pub mod patient;
pub mod report;
pub mod table;
pub mod taxonomy;

pub use code::{CanonicalCode, code_key};
pub use error::{ModelError, Result};
pub use patient::{Age, Gender, PatientRecord};
pub use report::{ReportKind, ReportRow};
pub use table::RecordTable;
pub use taxonomy::{ColumnLayout, DerivedColumn};
