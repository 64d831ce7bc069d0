//! Wire types for the backend REST surface

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

/// Relation sent when a profile is created from the client
pub const DEFAULT_RELATION: &str = "Family";

/// Named sub-identity under one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub relation: String,
}

/// Body of `POST /profiles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub name: String,
    pub relation: String,
}

impl NewProfile {
    /// Profile with the default relation
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: DEFAULT_RELATION.to_string(),
        }
    }
}

/// Structured analysis of one report
///
/// Every field may embed `[[Term]]` markers. `{}` decodes to a value with
/// no summary, which callers treat as "nothing to show".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub risks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// True when there is a non-empty summary to display
    pub fn has_summary(&self) -> bool {
        self.summary.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// `Some(self)` only when there is something to show
    pub fn into_present(self) -> Option<Self> {
        if self.has_summary() {
            Some(self)
        } else {
            None
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /define`
#[derive(Debug, Serialize)]
pub(crate) struct DefineRequest<'a> {
    pub term: &'a str,
}

/// Response of `POST /define`
#[derive(Debug, Deserialize)]
pub(crate) struct DefineResponse {
    pub definition: String,
}

/// Body of `POST /chat`
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Response of `POST /chat`
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub response: String,
}

/// Document selected for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// In-memory file; MIME inferred from the extension
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name);
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.pdf".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn mime_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_has_no_summary() {
        let result: AnalysisResult = serde_json::from_str("{}").unwrap();
        assert!(!result.has_summary());
        assert!(result.into_present().is_none());
    }

    #[test]
    fn test_empty_summary_is_absent() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"summary":"","risks":null}"#).unwrap();
        assert!(result.risks.is_empty());
        assert!(result.into_present().is_none());
    }

    #[test]
    fn test_full_analysis_decodes_in_order() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"summary":"Check [[TSH]]","risks":["a","b"],"recommendations":["c"]}"#,
        )
        .unwrap();
        assert!(result.has_summary());
        assert_eq!(result.risks, vec!["a", "b"]);
        assert_eq!(result.recommendations, vec!["c"]);
    }

    #[test]
    fn test_profile_without_relation() {
        let profile: Profile = serde_json::from_str(r#"{"id":"p1","name":"Dad"}"#).unwrap();
        assert_eq!(profile.relation, "");
    }

    #[test]
    fn test_upload_mime() {
        assert_eq!(UploadFile::new("Report.PDF", vec![]).mime, "application/pdf");
        assert_eq!(UploadFile::new("scan.png", vec![]).mime, "image/png");
        assert_eq!(UploadFile::new("labs.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(UploadFile::new("notes.html", vec![]).mime, "text/html");
        assert_eq!(UploadFile::new("results", vec![]).mime, "application/octet-stream");
    }
}
