//! Typed case-count rows and the read-only dataset they are loaded into.

mod dataset;
mod record;

pub use dataset::{Dataset, peak_record};
pub use record::{Record, Region};
