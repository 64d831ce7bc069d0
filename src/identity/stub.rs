//! Stub identity provider
//!
//! Signs any non-empty email/password pair in with a pre-issued token.
//! Used against development backends and when no provider account exists.

use async_trait::async_trait;

use crate::identity::{AuthError, AuthGrant, IdentityProvider};
use crate::session::Session;

/// Stub provider (returns a fixed token, no network calls)
#[derive(Debug, Clone)]
pub struct StubIdentity {
    /// Token handed out on every sign-in
    token: String,
}

impl StubIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AuthGrant {
            id_token: self.token.clone(),
            user_id: format!("stub:{}", email),
            email: email.to_string(),
        })
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<AuthGrant, AuthError> {
        Err(AuthError::Unknown(
            "the stub provider cannot create accounts".to_string(),
        ))
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
