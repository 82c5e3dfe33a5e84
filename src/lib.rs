//! Time-indexed demand profiles backed by comma-separated column strings.

pub mod error;
pub mod record;

pub use error::DemandError;
pub use record::{CrudFlag, DemandFields, DemandRecord, GapPolicy, RecordConfig};
