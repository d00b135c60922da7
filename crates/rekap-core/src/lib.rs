//! Report aggregation engine.
//!
//! [`Aggregator`] joins patient records to report rows on diagnosis code and
//! counts each match into the columns its [`rekap_classify::ClassifierSet`]
//! selects. Both report kinds share this one join; only the classifier set
//! differs.

#![deny(unsafe_code)]

pub mod aggregate;
pub mod error;
pub mod index;

pub use aggregate::{AggregationStats, Aggregator, RunReport};
pub use error::{CoreError, Result};
pub use index::RecordIndex;
