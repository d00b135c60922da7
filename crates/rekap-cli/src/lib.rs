//! Library side of the `rekap` binary: logging setup and the report run.

#![deny(unsafe_code)]

pub mod logging;
pub mod report;
