//! View model pieces
//!
//! Pure data produced from backend results. Nothing here knows how it is
//! drawn; `render` turns it into text for the terminal.

use reqwest::Url;

use crate::api::AnalysisResult;
use crate::ui::markup::RichText;

/// External search fallback for terms (`{term}` is replaced raw)
pub const DEFAULT_SEARCH_URL: &str = "https://medlineplus.gov/search?searchquery={term}";

/// Rendered analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisView {
    pub summary: RichText,
    pub risks: Vec<RichText>,
    pub recommendations: Vec<RichText>,
}

impl AnalysisView {
    /// Distinct terms across summary, risks and recommendations, in order
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let all = std::iter::once(&self.summary)
            .chain(self.risks.iter())
            .chain(self.recommendations.iter());
        for text in all {
            for term in text.terms() {
                if !terms.iter().any(|seen| seen == term) {
                    terms.push(term.to_string());
                }
            }
        }
        terms
    }
}

/// Turn an analysis result into its view, keeping list order
pub fn render_analysis(result: &AnalysisResult) -> AnalysisView {
    AnalysisView {
        summary: RichText::parse(result.summary.as_deref().unwrap_or_default()),
        risks: result.risks.iter().map(|r| RichText::parse(r)).collect(),
        recommendations: result
            .recommendations
            .iter()
            .map(|r| RichText::parse(r))
            .collect(),
    }
}

/// Definition lookup state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionStatus {
    Loading,
    Loaded(String),
    Failed(String),
}

/// Definition drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionPanel {
    pub term: String,
    pub status: DefinitionStatus,
    /// Manual fallback lookup, when the template yields a valid URL
    pub search_url: Option<String>,
}

impl DefinitionPanel {
    pub fn loading(term: &str, search_template: &str) -> Self {
        Self {
            term: term.to_string(),
            status: DefinitionStatus::Loading,
            search_url: search_url(search_template, term),
        }
    }
}

/// Fill `{term}` into a search URL template
///
/// The term goes in raw; URL parsing then percent-encodes what must be.
pub fn search_url(template: &str, term: &str) -> Option<String> {
    Url::parse(&template.replace("{term}", term))
        .ok()
        .map(|url| url.to_string())
}

/// Section visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub login: bool,
    pub upload: bool,
    pub logout: bool,
    pub analysis: bool,
    pub chat: bool,
}

impl Sections {
    pub fn signed_out() -> Self {
        Self {
            login: true,
            upload: false,
            logout: false,
            analysis: false,
            chat: false,
        }
    }

    pub fn signed_in() -> Self {
        Self {
            login: false,
            upload: true,
            logout: true,
            analysis: false,
            chat: false,
        }
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::signed_out()
    }
}
