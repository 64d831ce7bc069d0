//! Chat messages

use crate::api::types::{ChatRequest, ChatResponse};
use crate::api::{ApiClient, ClientError, PROFILE_HEADER};
use crate::session::Session;
use crate::transport::HttpRequest;

impl ApiClient {
    /// `POST /chat`
    ///
    /// The active profile, when there is one, goes in the `profile-id`
    /// header so the backend does not have to guess the context.
    pub async fn send_message(
        &self,
        session: &Session,
        message: &str,
        profile_id: Option<&str>,
    ) -> Result<String, ClientError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ClientError::InputMissing("message"));
        }
        let mut request =
            HttpRequest::post_json(self.endpoint(&["chat"])?, &ChatRequest { message })?;
        if let Some(profile_id) = profile_id.filter(|id| !id.is_empty()) {
            request = request.header(PROFILE_HEADER, profile_id);
        }
        let request = self.authorize(session, request)?;
        let response = self.execute(request).await?;
        let body: ChatResponse = Self::decode(&response)?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, ClientError, PROFILE_HEADER};
    use crate::session::SessionManager;
    use crate::transport::{FakeReply, FakeTransport, Method, Transport};

    #[tokio::test]
    async fn test_send_message_scoped_to_profile() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Post,
            "/chat",
            FakeReply::json(serde_json::json!({"response": "Drink water."})),
        );
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake.clone()));

        let reply = api
            .send_message(&session, "  what now?  ", Some("p3"))
            .await
            .unwrap();
        assert_eq!(reply, "Drink water.");

        let request = &fake.requests()[0];
        assert_eq!(request.json_body().unwrap()["message"], "what now?");
        assert_eq!(request.header_value(PROFILE_HEADER), Some("p3"));
    }

    #[tokio::test]
    async fn test_empty_message_blocked() {
        let fake = FakeTransport::new();
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake.clone()));

        assert_eq!(
            api.send_message(&session, "   ", None).await.unwrap_err(),
            ClientError::InputMissing("message")
        );
        assert_eq!(fake.request_count(), 0);
    }
}
