//! Request client errors

use crate::transport::TransportError;

/// Request client errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Required input empty; the call was never issued
    #[error("Missing input: {0}")]
    InputMissing(&'static str),

    /// No active session; the call was never issued
    #[error("Not signed in")]
    NotAuthenticated,

    /// Transport or HTTP status failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_is_transparent() {
        let err: ClientError = TransportError::RateLimited.into();
        assert_eq!(err.to_string(), "Rate limited");
        assert_eq!(ClientError::InputMissing("term").to_string(), "Missing input: term");
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
