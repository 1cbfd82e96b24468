//! Networking utilities for the water data dashboard
//!
//! This crate provides the GET requester used to talk to remote data
//! services, the response type it hands back, and helpers for building
//! service URLs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod response;
pub mod urls;

pub use client::{GetRequest, HttpClient, HttpClientConfig};
pub use response::Response;
pub use urls::{build_url, join_url};

/// Result type for networking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for networking operations
///
/// Timeouts and connection failures during a guarded GET never show up
/// here; they become an empty [`Response`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base URL or path could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport error that is not a timeout or connection failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured header name or value is not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = Error::InvalidHeader("bad\nname".to_string());
        assert!(err.to_string().contains("Invalid header"));

        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = Error::from(parse_err);
        assert!(err.to_string().starts_with("Invalid URL"));
    }
}
