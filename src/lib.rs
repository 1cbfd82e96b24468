//! Water data dashboard service helpers
//!
//! This crate re-exports the workspace crates a hosting web application
//! needs: the guarded GET requester and URL helpers (`networking`), the RDB
//! decoder (`rdb`), and the partner, timezone and site lookups
//! (`services`). It also installs logging for hosts that do not bring their
//! own `tracing` subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod telemetry;

pub use networking;
pub use rdb;
pub use services;

pub use networking::{build_url, HttpClient, HttpClientConfig, Response};
pub use rdb::{parse_rdb, RdbError, RdbRecord};
pub use services::{
    defined_when, lookup_cooperator, site_timezone_offset, CooperatorInfo, ServiceContext,
    ServiceError, ServicesConfig, TimezoneInfo,
};
