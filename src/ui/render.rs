//! Plain-text rendering of the view model
//!
//! Terms are drawn as `[Term]` and listed with numbers so the shell can
//! refer to them as `/define <number>`.

use std::fmt::Write;

use crate::ui::markup::{RichText, Segment};
use crate::ui::notice::Notice;
use crate::ui::state::UiState;
use crate::ui::transcript::ChatRole;
use crate::ui::view::{AnalysisView, DefinitionPanel, DefinitionStatus};

/// Inline rendering of marked-up text
pub fn render_rich(text: &RichText) -> String {
    let mut out = String::new();
    for segment in text.segments() {
        match segment {
            Segment::Text(run) => out.push_str(run),
            Segment::Term(term) => {
                let _ = write!(out, "[{}]", term);
            }
        }
    }
    out
}

pub fn render_analysis_view(view: &AnalysisView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary");
    let _ = writeln!(out, "  {}", render_rich(&view.summary));
    if !view.risks.is_empty() {
        let _ = writeln!(out, "Risks");
        for risk in &view.risks {
            let _ = writeln!(out, "  - {}", render_rich(risk));
        }
    }
    if !view.recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations");
        for rec in &view.recommendations {
            let _ = writeln!(out, "  - {}", render_rich(rec));
        }
    }
    let terms = view.terms();
    if !terms.is_empty() {
        let listed: Vec<String> = terms
            .iter()
            .enumerate()
            .map(|(i, term)| format!("{}) {}", i + 1, term))
            .collect();
        let _ = writeln!(out, "Terms: {}", listed.join("  "));
    }
    out
}

pub fn render_definition(panel: &DefinitionPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", panel.term);
    match &panel.status {
        DefinitionStatus::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        DefinitionStatus::Loaded(text) | DefinitionStatus::Failed(text) => {
            let _ = writeln!(out, "{}", text);
        }
    }
    if let Some(url) = &panel.search_url {
        let _ = writeln!(out, "Search: {}", url);
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    if notice.is_alert() {
        format!("! {}", notice.text())
    } else {
        format!("  ({})", notice.text())
    }
}

/// Everything currently visible
pub fn render_view(state: &UiState) -> String {
    let mut out = String::new();
    if state.sections.login {
        let _ = writeln!(out, "Signed out. Use /login <email> or /register <email>.");
        return out;
    }

    if state.sections.upload {
        if state.profiles.is_empty() {
            let _ = writeln!(out, "No profiles yet. Use /new <name>.");
        } else {
            let _ = writeln!(out, "Profiles");
            for (i, profile) in state.profiles.iter().enumerate() {
                let marker = if state.active_profile.as_deref() == Some(profile.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                let _ = writeln!(
                    out,
                    " {} {}) {} ({})",
                    marker,
                    i + 1,
                    profile.name,
                    profile.relation
                );
            }
        }
        if state.busy {
            let _ = writeln!(out, "Analyzing...");
        }
    }

    if state.sections.analysis {
        if let Some(view) = &state.analysis {
            out.push_str(&render_analysis_view(view));
        }
    }

    if state.sections.chat && !state.transcript.is_empty() {
        let _ = writeln!(out, "Chat");
        for turn in state.transcript.turns() {
            let who = match turn.role {
                ChatRole::User => "you",
                ChatRole::Assistant => "althea",
            };
            let _ = writeln!(out, "  {}: {}", who, turn.text);
        }
    }

    if let Some(panel) = &state.definition {
        out.push_str(&render_definition(panel));
    }
    out
}
