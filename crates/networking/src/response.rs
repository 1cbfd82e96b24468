//! HTTP response returned by the GET requester

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use url::Url;

use crate::Result;

/// Response of a GET request
///
/// A response is either one received from the remote service, with a
/// status, headers and a fully read body, or the empty response produced
/// when the request never completed (timeout or connection failure). The
/// empty response has no status and no body and is never [`ok`](Self::is_ok).
#[derive(Debug, Clone, Default)]
pub struct Response {
    status: Option<StatusCode>,
    url: Option<Url>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create a response received from a service
    pub fn new(status: StatusCode, url: Url, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status: Some(status),
            url: Some(url),
            headers,
            body,
        }
    }

    /// Create the empty response standing in for a failed request
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the empty response of a failed request
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }

    /// Whether a status was received and it is not a 4xx or 5xx error
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Some(status) if !status.is_client_error() && !status.is_server_error())
    }

    /// HTTP status, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Final URL of the request, if a response was received
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as text
    ///
    /// A body declared as ISO-8859-1 in its `Content-Type` charset is decoded
    /// byte for byte. Any other body is read as UTF-8 with invalid sequences
    /// replaced by U+FFFD, so other single-byte charsets are not recovered.
    pub fn text(&self) -> Cow<'_, str> {
        if self.charset().is_some_and(is_latin1) {
            return Cow::Owned(self.body.iter().map(|&b| char::from(b)).collect());
        }
        String::from_utf8_lossy(&self.body)
    }

    /// Charset parameter of the `Content-Type` header
    pub fn charset(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())?
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim().trim_matches('"'))
    }

    /// Deserialize the body as JSON
    ///
    /// The empty response has no body and always fails to decode.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

fn is_latin1(charset: &str) -> bool {
    ["iso-8859-1", "iso_8859-1", "latin1"]
        .iter()
        .any(|name| charset.eq_ignore_ascii_case(name))
}
