//! GET requester for remote data services
//!
//! [`HttpClient`] issues GET requests and narrows transport hiccups
//! (timeouts and connection failures) into an empty [`Response`]. Every
//! other fault is returned to the caller. No retries are attempted.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::response::Response;
use crate::urls::join_url;
use crate::{Error, Result};

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout, covering connect, send and body read
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("waterdata/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::InvalidHeader(key.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidHeader(format!("{}: {}", key, value)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// A GET request against a service endpoint
///
/// The target is the base host with the optional path resolved against it.
/// Query parameters keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    /// Scheme and host of the target service
    pub base: String,
    /// Path resolved against the base
    pub path: Option<String>,
    /// Query parameters
    pub params: Vec<(String, String)>,
}

impl GetRequest {
    /// Create a request for a base host
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            path: None,
            params: Vec::new(),
        }
    }

    /// Set the path part of the URL
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Resolve the target URL, without query parameters
    pub fn target(&self) -> Result<Url> {
        join_url(&self.base, self.path.as_deref())
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

/// HTTP client for GET requests against remote data services
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Examples
/// ```
/// use networking::{HttpClient, HttpClientConfig};
///
/// async fn example() -> networking::Result<()> {
///     let client = HttpClient::new(HttpClientConfig::default())?;
///
///     let response = client
///         .get("https://waterservices.usgs.gov", Some("/nwis/site/"), [("sites", "01646500")])
///         .await?;
///
///     if response.is_ok() {
///         println!("{}", response.text());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(config.header_map()?)
            .build()?;

        Ok(Self { client, config })
    }

    /// Do a GET request against a service endpoint
    ///
    /// Returns the empty response if the request times out or the
    /// connection fails. A malformed URL or any other transport error is
    /// returned as an error.
    pub async fn get<I, K, V>(&self, base: &str, path: Option<&str>, params: I) -> Result<Response>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut request = GetRequest::new(base).params(params);
        request.path = path.map(str::to_string);
        self.execute(request).await
    }

    /// Execute a GET request, converting transport hiccups into the empty response
    pub async fn execute(&self, request: GetRequest) -> Result<Response> {
        let target = request.target()?;

        match self.send(target.clone(), &request.params).await {
            Ok(response) => Ok(response),
            Err(Error::Transport(err)) if err.is_timeout() || err.is_connect() => {
                tracing::debug!(url = %target, error = ?err, "GET request failed, returning empty response");
                Ok(Response::empty())
            }
            Err(err) => Err(err),
        }
    }

    /// GET a URL and decode the JSON body, with no fault isolation
    ///
    /// Transport errors, non-success statuses and undecodable bodies are
    /// all returned as errors.
    pub async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::trace!(url = %url, "issuing GET for JSON");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send the request and read the whole body
    async fn send(&self, url: Url, params: &[(String, String)]) -> Result<Response> {
        tracing::trace!(url = %url, "issuing GET");

        let mut req = self.client.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }

        let response = req.send().await?;
        let status = response.status();
        let final_url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, final_url, headers, body.to_vec()))
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
