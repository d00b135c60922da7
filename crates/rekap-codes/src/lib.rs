//! Diagnosis-code range expansion.
//!
//! Report templates are typed by hand and use a compact notation for code
//! groups, for example `A 06.0-.3,.5-.9` or `A 15.1-16.2`. This crate turns
//! such expressions into the ordered list of [`CanonicalCode`]s they denote.
//!
//! Expansion never fails: segments that match no known notation degrade to
//! a cleaned literal so that a single irregular template row does not sink
//! the whole report.
//!
//! # Example
//!
//! ```
//! use rekap_codes::expand;
//!
//! let codes = expand("A 06.0-.2,.5");
//! let codes: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
//! assert_eq!(codes, ["A06.0", "A06.1", "A06.2", "A06.5"]);
//! ```

#![deny(unsafe_code)]

mod expander;
mod segment;

pub use expander::{Expander, MAX_SEGMENT_CODES, expand, expand_with_prefix};
pub use segment::{RangeNotation, SegmentKind, classify_segment};

pub use rekap_model::CanonicalCode;
