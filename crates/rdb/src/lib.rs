//! RDB decoding for the water data dashboard
//!
//! RDB is the tab-delimited text format served by the hydrological data
//! services. A file is laid out as:
//!
//! ```text
//! # comment lines, any number
//! agency_cd	site_no	station_nm        <- column headers
//! 5s	15s	50s                            <- column types, ignored
//! USGS	01646500	POTOMAC RIVER          <- data rows
//! ```
//!
//! [`parse_rdb`] finds the headers and lazily decodes each data row into an
//! [`RdbRecord`] keyed by header name.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod reader;
pub mod record;

pub use reader::{parse_rdb, parse_rdb_str, RdbRecords};
pub use record::RdbRecord;

/// Result type for RDB decoding
pub type Result<T> = std::result::Result<T, RdbError>;

/// Error types for RDB decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RdbError {
    /// The input ended before a column header line was found
    #[error("RDB column headers not found.")]
    MissingHeader,
}
