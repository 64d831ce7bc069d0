//! Profile registry calls

use tracing::debug;

use crate::api::types::{AnalysisResult, NewProfile, Profile};
use crate::api::{ApiClient, ClientError};
use crate::session::Session;
use crate::transport::HttpRequest;

impl ApiClient {
    /// `GET /profiles`
    pub async fn list_profiles(&self, session: &Session) -> Result<Vec<Profile>, ClientError> {
        let request = self.authorize(session, HttpRequest::get(self.endpoint(&["profiles"])?))?;
        let response = self.execute(request).await?;
        let profiles: Vec<Profile> = Self::decode(&response)?;
        debug!(count = profiles.len(), "profiles loaded");
        Ok(profiles)
    }

    /// `POST /profiles`; the created record is not returned to callers
    pub async fn create_profile(
        &self,
        session: &Session,
        profile: &NewProfile,
    ) -> Result<(), ClientError> {
        if profile.name.trim().is_empty() {
            return Err(ClientError::InputMissing("profile name"));
        }
        let request = HttpRequest::post_json(self.endpoint(&["profiles"])?, profile)?;
        let request = self.authorize(session, request)?;
        self.execute(request).await?;
        Ok(())
    }

    /// `GET /profiles/{id}/latest`
    ///
    /// `Ok(None)` when the profile has no prior analysis.
    pub async fn latest_analysis(
        &self,
        session: &Session,
        profile_id: &str,
    ) -> Result<Option<AnalysisResult>, ClientError> {
        if profile_id.is_empty() {
            return Err(ClientError::InputMissing("profile id"));
        }
        let url = self.endpoint(&["profiles", profile_id, "latest"])?;
        let request = self.authorize(session, HttpRequest::get(url))?;
        let response = self.execute(request).await?;
        let result: AnalysisResult = Self::decode(&response)?;
        Ok(result.into_present())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, ClientError, NewProfile, TOKEN_HEADER};
    use crate::session::SessionManager;
    use crate::transport::{FakeReply, FakeTransport, Method, Transport, TransportError};

    fn client(fake: &FakeTransport) -> ApiClient {
        ApiClient::new("http://backend", Transport::Fake(fake.clone()))
    }

    #[tokio::test]
    async fn test_list_profiles_sends_token() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Get,
            "/profiles",
            FakeReply::json(serde_json::json!([
                {"id": "p1", "name": "My Health", "relation": "Self"},
                {"id": "p2", "name": "Dad", "relation": "Family"}
            ])),
        );
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok-1".to_string(), "u".to_string(), "e".to_string())
            .await;

        let profiles = client(&fake).list_profiles(&session).await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1].name, "Dad");
        assert_eq!(fake.requests()[0].header_value(TOKEN_HEADER), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_revoked_session_issues_no_call() {
        let fake = FakeTransport::new();
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        sessions.invalidate().await;

        let api = client(&fake);
        assert_eq!(
            api.list_profiles(&session).await.unwrap_err(),
            ClientError::NotAuthenticated
        );
        assert_eq!(
            api.latest_analysis(&session, "p1").await.unwrap_err(),
            ClientError::NotAuthenticated
        );
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_profile_rejects_blank_name() {
        let fake = FakeTransport::new();
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;

        let err = client(&fake)
            .create_profile(&session, &NewProfile::named("   "))
            .await
            .unwrap_err();
        assert_eq!(err, ClientError::InputMissing("profile name"));
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_profile_body() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Post,
            "/profiles",
            FakeReply::json(serde_json::json!({
                "id": "p9",
                "name": "Sister",
                "relation": "Family"
            })),
        );
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;

        client(&fake)
            .create_profile(&session, &NewProfile::named("Sister"))
            .await
            .unwrap();
        let body = fake.requests()[0].json_body().unwrap();
        assert_eq!(body, serde_json::json!({"name": "Sister", "relation": "Family"}));
    }

    #[tokio::test]
    async fn test_latest_empty_object_is_none() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles/p1/latest", FakeReply::json(serde_json::json!({})));
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;

        let latest = client(&fake).latest_analysis(&session, "p1").await.unwrap();
        assert!(latest.is_none());
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles", FakeReply::status(500, r#"{"detail":"boom"}"#));
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;

        let err = client(&fake).list_profiles(&session).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::Http { status: 500, .. })
        ));
    }
}
