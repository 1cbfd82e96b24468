//! Domain lookups for the water data dashboard
//!
//! This crate builds on the `networking` and `rdb` crates to provide the
//! cooperating partner lookup, the site timezone lookup, site inventory
//! retrieval, and the configuration binding them to a hosting application.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod cooperator;
pub mod site;
pub mod strategy;
pub mod timezone;

pub use config::{CooperatorLookupConfig, ServicesConfig};
pub use context::ServiceContext;
pub use cooperator::{
    cooperator_provider, lookup_cooperator, Cooperator, CooperatorInfo, CooperatorProvider,
    DisabledCooperatorProvider, HttpCooperatorProvider,
};
pub use site::fetch_site_records;
pub use strategy::defined_when;
pub use timezone::{site_timezone_offset, zone_offsets, TimezoneInfo, WEATHER_SERVICE_ROOT};

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Error types for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Request could not be issued or its response could not be read
    #[error("Request error: {0}")]
    Request(#[from] networking::Error),

    /// RDB body could not be decoded
    #[error("RDB error: {0}")]
    Rdb(#[from] rdb::RdbError),

    /// A lookup service answered with a body of an unexpected shape
    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    /// The weather service response has no `properties.timeZone`
    #[error("Timezone not found in weather service response")]
    MissingTimezone,

    /// The timezone name is not a known IANA zone
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// A reference date has no valid local time in the zone
    #[error("No local time for {date} in {timezone}")]
    InvalidLocalTime {
        /// Timezone name
        timezone: String,
        /// Reference date
        date: String,
    },

    /// A configuration value could not be parsed
    #[error("Invalid configuration value for {key}: {value}")]
    InvalidConfig {
        /// Configuration key
        key: String,
        /// Rejected value
        value: String,
    },
}
