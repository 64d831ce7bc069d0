//! Transport types
//!
//! Request/response shapes shared by the real and fake transports.

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Transport errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Backend rejected the identity token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited
    #[error("Rate limited")]
    RateLimited,

    /// Request could not be built (bad URL, unserializable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_builder() => TransportError::InvalidRequest(err.to_string()),
            None => TransportError::Network(err.to_string()),
        }
    }
}

/// HTTP method subset used by the backend surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// Single file carried in a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// File name reported to the server
    pub file_name: String,
    /// MIME type of the payload
    pub mime: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// Request body variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(FilePart),
}

/// Outgoing HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// GET request without body
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// POST request with a JSON body and matching Content-Type
    pub fn post_json<T: Serialize>(
        url: impl Into<String>,
        body: &T,
    ) -> Result<Self, TransportError> {
        let json = serde_json::to_string(body)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: RequestBody::Json(json),
        })
    }

    /// POST request carrying one file as multipart form content
    pub fn post_multipart(url: impl Into<String>, part: FilePart) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Multipart(part),
        }
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive name match)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// URL path component, without host or query
    pub fn path(&self) -> String {
        Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| self.url.clone())
    }

    /// JSON body, if any
    pub fn json_body(&self) -> Option<serde_json::Value> {
        match &self.body {
            RequestBody::Json(body) => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Response as seen by callers: status plus raw body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn non-2xx statuses into transport errors
    ///
    /// 401 maps to `Unauthorized`, 429 to `RateLimited`, everything else
    /// at or above 400 to `Http` carrying the server's `detail` when present.
    pub fn error_for_status(self) -> Result<Self, TransportError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = error_detail(&self.body);
        match self.status {
            401 => Err(TransportError::Unauthorized(message)),
            429 => Err(TransportError::RateLimited),
            status => Err(TransportError::Http { status, message }),
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Extract `{"detail": "..."}` from an error body, falling back to the raw text
fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client so request clients can be exercised
/// with `FakeTransport`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the response for any status.
    ///
    /// Only failures to complete the exchange are errors here; status
    /// handling is left to the caller.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
