//! Identity provider boundary
//!
//! Sign-in, sign-up and sign-out against a third-party identity provider.
//! The provider's wire protocol stays behind `IdentityProvider`; callers see
//! an `AuthGrant` on success and an `AuthError` kind on failure.

pub mod firebase;
pub mod stub;

use async_trait::async_trait;

use crate::session::Session;

pub use firebase::FirebaseIdentity;
pub use stub::StubIdentity;

/// Authentication failures, one user-facing message per kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Email or password left empty (no provider call made)
    #[error("Email and password are required")]
    InputMissing,

    /// Provider rejected the email/password pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Provider is throttling attempts for this account
    #[error("Too many attempts")]
    RateLimited,

    /// Anything else; message passed through from the provider
    #[error("{0}")]
    Unknown(String),
}

impl AuthError {
    /// Message shown when sign-in fails
    pub fn sign_in_message(&self) -> String {
        match self {
            AuthError::InputMissing => "Please enter email and password.".to_string(),
            AuthError::RateLimited => {
                "Security block: Too many failed attempts. Please wait 5 minutes.".to_string()
            }
            AuthError::InvalidCredentials => "Wrong email or password.".to_string(),
            AuthError::Unknown(message) => format!("Error: {}", message),
        }
    }

    /// Message shown when sign-up fails (provider message passed through)
    pub fn sign_up_message(&self) -> String {
        match self {
            AuthError::InputMissing => "Please enter email and password.".to_string(),
            other => format!("Registration failed: {}", other),
        }
    }
}

/// Successful authentication result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Opaque ID token presented to the backend
    pub id_token: String,
    pub user_id: String,
    pub email: String,
}

/// Identity provider trait
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError>;

    /// Create an account; providers sign the new account in immediately
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError>;

    /// Remote sign-out; failures are never surfaced to the user
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

/// Identity enum, the concrete type for all providers
#[derive(Debug, Clone)]
pub enum Identity {
    Firebase(FirebaseIdentity),
    Stub(StubIdentity),
}

#[async_trait]
impl IdentityProvider for Identity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        match self {
            Identity::Firebase(p) => p.sign_in(email, password).await,
            Identity::Stub(p) => p.sign_in(email, password).await,
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthGrant, AuthError> {
        match self {
            Identity::Firebase(p) => p.sign_up(email, password).await,
            Identity::Stub(p) => p.sign_up(email, password).await,
        }
    }

    async fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        match self {
            Identity::Firebase(p) => p.sign_out(session).await,
            Identity::Stub(p) => p.sign_out(session).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Identity::Firebase(p) => p.provider_name(),
            Identity::Stub(p) => p.provider_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_messages() {
        assert_eq!(
            AuthError::RateLimited.sign_in_message(),
            "Security block: Too many failed attempts. Please wait 5 minutes."
        );
        assert_eq!(
            AuthError::InvalidCredentials.sign_in_message(),
            "Wrong email or password."
        );
        assert_eq!(
            AuthError::Unknown("EMAIL_EXISTS".to_string()).sign_in_message(),
            "Error: EMAIL_EXISTS"
        );
        assert_eq!(
            AuthError::InputMissing.sign_in_message(),
            "Please enter email and password."
        );
    }

    #[test]
    fn test_sign_up_message_passes_through() {
        assert_eq!(
            AuthError::Unknown("EMAIL_EXISTS".to_string()).sign_up_message(),
            "Registration failed: EMAIL_EXISTS"
        );
    }
}
