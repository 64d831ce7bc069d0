//! Backend request clients
//!
//! One `ApiClient` covers the REST surface:
//! - `GET/POST /profiles`, `GET /profiles/{id}/latest`
//! - `POST /analyze` (multipart, `profile-id` header)
//! - `POST /define`
//! - `POST /chat`
//!
//! Every call takes the caller's `Session` explicitly and is refused
//! without touching the network once that session is no longer active.

mod analysis;
mod chat;
mod definitions;
mod errors;
mod profiles;
mod types;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Transport, TransportError};

pub use errors::ClientError;
pub use types::{AnalysisResult, NewProfile, Profile, UploadFile, DEFAULT_RELATION};

/// Header carrying the identity token
pub const TOKEN_HEADER: &str = "token";
/// Header carrying the profile a request is scoped to
pub const PROFILE_HEADER: &str = "profile-id";

/// Client for the analysis backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Transport,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Transport) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path under the base URL (segments are percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Result<String, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::InvalidRequest(format!("bad base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                TransportError::InvalidRequest(format!(
                    "base URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    /// Attach the session token, refusing inactive sessions
    fn authorize(
        &self,
        session: &Session,
        request: HttpRequest,
    ) -> Result<HttpRequest, ClientError> {
        if !session.is_active() {
            debug!(path = %request.path(), "blocked request without active session");
            return Err(ClientError::NotAuthenticated);
        }
        Ok(request.header(TOKEN_HEADER, session.token()))
    }

    /// Send and reject non-2xx responses
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let response = self.transport.send(request).await?;
        Ok(response.error_for_status()?)
    }

    fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
        Ok(response.json()?)
    }
}
