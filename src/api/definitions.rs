//! Term definition lookup

use crate::api::types::{DefineRequest, DefineResponse};
use crate::api::{ApiClient, ClientError};
use crate::session::Session;
use crate::transport::HttpRequest;

impl ApiClient {
    /// `POST /define`
    pub async fn define(&self, session: &Session, term: &str) -> Result<String, ClientError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ClientError::InputMissing("term"));
        }
        let request = HttpRequest::post_json(self.endpoint(&["define"])?, &DefineRequest { term })?;
        let request = self.authorize(session, request)?;
        let response = self.execute(request).await?;
        let body: DefineResponse = Self::decode(&response)?;
        Ok(body.definition)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, ClientError};
    use crate::session::SessionManager;
    use crate::transport::{FakeReply, FakeTransport, Method, Transport};

    #[tokio::test]
    async fn test_define_round_trip() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Post,
            "/define",
            FakeReply::json(serde_json::json!({"definition": "A thyroid hormone test."})),
        );
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake.clone()));

        let definition = api.define(&session, "TSH").await.unwrap();
        assert_eq!(definition, "A thyroid hormone test.");
        assert_eq!(fake.requests()[0].json_body().unwrap()["term"], "TSH");
    }

    #[tokio::test]
    async fn test_define_blank_term_blocked() {
        let fake = FakeTransport::new();
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake.clone()));

        assert_eq!(
            api.define(&session, "  ").await.unwrap_err(),
            ClientError::InputMissing("term")
        );
        assert_eq!(fake.request_count(), 0);
    }
}
