//! Firebase identity provider
//!
//! Email/password accounts through the Identity Toolkit REST endpoints:
//! - `accounts:signInWithPassword`
//! - `accounts:signUp`
//!
//! There is no remote sign-out; ending a session is local only.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::identity::{AuthError, AuthGrant, IdentityProvider};
use crate::session::Session;
use crate::transport::{HttpRequest, HttpTransport, Transport};

/// Identity Toolkit base URL
pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Firebase Identity Toolkit provider
#[derive(Debug, Clone)]
pub struct FirebaseIdentity {
    base_url: String,
    api_key: String,
    transport: Transport,
}

impl FirebaseIdentity {
    pub fn new(api_key: impl Into<String>, transport: Transport) -> Self {
        Self::with_base_url(IDENTITY_TOOLKIT_URL, api_key, transport)
    }

    /// Provider pointed at a different host (emulator, tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: Transport,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            transport,
        }
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
        classify: fn(&str) -> AuthError,
    ) -> Result<AuthGrant, AuthError> {
        let url = format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key);
        let body = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let request = HttpRequest::post_json(url, &body)
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        debug!(action, "identity request");
        let response = self.transport.send(request).await.map_err(|e| {
            warn!(action, error = %e, "identity provider unreachable");
            AuthError::Unknown(e.to_string())
        })?;

        if !response.is_success() {
            return Err(classify(&response.body));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| AuthError::Unknown(format!("unexpected provider response: {}", e)))?;

        Ok(AuthGrant {
            id_token: token.id_token,
            user_id: token.local_id,
            email: token.email.unwrap_or_else(|| email.to_string()),
        })
    }
}

/// Map a sign-in error body onto an `AuthError` kind
///
/// Provider messages look like `INVALID_PASSWORD` or
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been ...`;
/// the code is the part before the first colon.
pub fn classify_error(body: &str) -> AuthError {
    let message = provider_message(body);
    let code = message.split(':').next().unwrap_or_default().trim();
    match code {
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND"
        | "USER_DISABLED" => AuthError::InvalidCredentials,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::RateLimited,
        _ => unknown(message),
    }
}

/// Sign-up errors are never classified; the provider message passes through
pub fn classify_sign_up_error(body: &str) -> AuthError {
    unknown(provider_message(body))
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn unknown(message: String) -> AuthError {
    if message.trim().is_empty() {
        AuthError::Unknown("unknown provider error".to_string())
    } else {
        AuthError::Unknown(message)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        self.password_call("signInWithPassword", email, password, classify_error)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        self.password_call("signUp", email, password, classify_sign_up_error)
            .await
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        debug!(user_id = %session.user_id(), "local sign-out");
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "firebase"
    }
}
