//! Report analysis upload

use tracing::info;

use crate::api::types::{AnalysisResult, UploadFile};
use crate::api::{ApiClient, ClientError, PROFILE_HEADER};
use crate::session::Session;
use crate::transport::{FilePart, HttpRequest};

/// Multipart field the backend reads the document from
const FILE_FIELD: &str = "file";

impl ApiClient {
    /// `POST /analyze`
    ///
    /// The document goes out as multipart field `file`; the profile rides
    /// in the `profile-id` header, not the form.
    pub async fn analyze(
        &self,
        session: &Session,
        profile_id: &str,
        file: &UploadFile,
    ) -> Result<AnalysisResult, ClientError> {
        if profile_id.is_empty() {
            return Err(ClientError::InputMissing("profile id"));
        }
        let part = FilePart {
            field: FILE_FIELD.to_string(),
            file_name: file.file_name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        };
        let request = HttpRequest::post_multipart(self.endpoint(&["analyze"])?, part)
            .header(PROFILE_HEADER, profile_id);
        let request = self.authorize(session, request)?;

        info!(profile_id, file = %file.file_name, bytes = file.bytes.len(), "submitting report");
        let response = self.execute(request).await?;
        Self::decode(&response)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiClient, ClientError, UploadFile, PROFILE_HEADER, TOKEN_HEADER};
    use crate::session::SessionManager;
    use crate::transport::{FakeReply, FakeTransport, Method, RequestBody, Transport};

    #[tokio::test]
    async fn test_analyze_multipart_with_profile_header() {
        let fake = FakeTransport::new();
        fake.always(
            Method::Post,
            "/analyze",
            FakeReply::json(serde_json::json!({
                "summary": "Normal [[CBC]].",
                "risks": ["Low [[Ferritin]]"],
                "recommendations": []
            })),
        );
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake.clone()));

        let file = UploadFile::new("labs.pdf", b"%PDF-1.4".to_vec());
        let result = api.analyze(&session, "p7", &file).await.unwrap();
        assert_eq!(result.summary.as_deref(), Some("Normal [[CBC]]."));

        let request = &fake.requests()[0];
        assert_eq!(request.header_value(PROFILE_HEADER), Some("p7"));
        assert_eq!(request.header_value(TOKEN_HEADER), Some("tok"));
        match &request.body {
            RequestBody::Multipart(part) => {
                assert_eq!(part.field, "file");
                assert_eq!(part.file_name, "labs.pdf");
                assert_eq!(part.mime, "application/pdf");
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_parse_failure() {
        let fake = FakeTransport::new();
        fake.always(Method::Post, "/analyze", FakeReply::status(200, "<html>"));
        let sessions = SessionManager::new();
        let session = sessions
            .establish("tok".to_string(), "u".to_string(), "e".to_string())
            .await;
        let api = ApiClient::new("http://backend", Transport::Fake(fake));

        let err = api
            .analyze(&session, "p1", &UploadFile::new("a.pdf", vec![1]))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
