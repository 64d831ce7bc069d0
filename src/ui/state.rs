//! View model state
//!
//! `UiState` is everything a front end needs to draw the app:
//! - section visibility
//! - profile list and the active profile
//! - analysis view and chat transcript
//! - definition drawer
//! - queued notices

use crate::api::Profile;
use crate::ui::notice::Notice;
use crate::ui::transcript::Transcript;
use crate::ui::view::{AnalysisView, DefinitionPanel, Sections};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub sections: Sections,
    pub profiles: Vec<Profile>,
    /// Id of the selected profile (at most one)
    pub active_profile: Option<String>,
    pub analysis: Option<AnalysisView>,
    pub transcript: Transcript,
    pub definition: Option<DefinitionPanel>,
    /// An analysis upload is in flight
    pub busy: bool,
    pub(crate) notices: Vec<Notice>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        let id = self.active_profile.as_deref()?;
        self.profiles.iter().find(|profile| profile.id == id)
    }

    /// Look a profile up by 1-based list position or by id
    pub fn find_profile(&self, reference: &str) -> Option<&Profile> {
        let reference = reference.trim();
        if let Ok(index) = reference.parse::<usize>() {
            if let Some(profile) = index.checked_sub(1).and_then(|i| self.profiles.get(i)) {
                return Some(profile);
            }
        }
        self.profiles.iter().find(|profile| profile.id == reference)
    }

    /// Notices not yet taken
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub(crate) fn enter_signed_in(&mut self) {
        let notices = std::mem::take(&mut self.notices);
        *self = UiState {
            sections: Sections::signed_in(),
            notices,
            ..UiState::default()
        };
    }

    pub(crate) fn reset_signed_out(&mut self) {
        let notices = std::mem::take(&mut self.notices);
        *self = UiState {
            notices,
            ..UiState::default()
        };
    }

    /// Switch the active profile, hiding the previous profile's content
    pub(crate) fn activate_profile(&mut self, profile_id: Option<String>) {
        self.active_profile = profile_id;
        self.sections.analysis = false;
        self.sections.chat = false;
        self.analysis = None;
        self.transcript.clear();
    }

    pub(crate) fn show_analysis(&mut self, view: AnalysisView) {
        self.analysis = Some(view);
        self.sections.analysis = true;
        self.sections.chat = true;
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
