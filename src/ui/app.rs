//! Application controller
//!
//! Routes user actions to the identity provider and the request clients
//! and folds the results into `UiState`.
//!
//! Overlapping requests are resolved per slot: each action takes a ticket
//! from its `RequestSlot` and a completion is applied only if its ticket is
//! still the latest and the session it was issued under is still active.
//! - definition drawer: latest lookup wins
//! - profile switch: latest selection wins
//! - analysis upload: latest upload wins, and only for the profile it targeted
//! - chat: replies for a profile that is no longer selected are dropped

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, NewProfile, UploadFile};
use crate::identity::{AuthError, AuthGrant, Identity, IdentityProvider};
use crate::session::{AuthState, RequestSlot, RequestTicket, Session, SessionManager};
use crate::ui::notice::Notice;
use crate::ui::state::UiState;
use crate::ui::view::{render_analysis, DefinitionPanel, DefinitionStatus, DEFAULT_SEARCH_URL};

pub const MSG_ACCOUNT_CREATED: &str = "Account created! Welcome to Althea.";
pub const MSG_SIGN_IN_REQUIRED: &str = "Please sign in first.";
pub const MSG_CREATE_PROFILE_FAILED: &str = "Could not create profile.";
pub const MSG_NO_FILE: &str = "Please select a PDF report first.";
pub const MSG_NO_PROFILE: &str = "Please select a profile first.";
pub const MSG_ANALYSIS_FAILED: &str = "Analysis failed. Check your backend.";
pub const MSG_CHAT_FAILED: &str = "Chat failed.";
pub const MSG_DEFINITION_FAILED: &str = "Could not load definition.";

/// Main application controller
pub struct App {
    sessions: SessionManager,
    identity: Identity,
    api: ApiClient,
    search_template: String,
    state: RwLock<UiState>,
    listing: RequestSlot,
    profile_slot: RequestSlot,
    definition_slot: RequestSlot,
    analysis_slot: RequestSlot,
}

impl App {
    pub fn new(identity: Identity, api: ApiClient) -> Self {
        Self {
            sessions: SessionManager::new(),
            identity,
            api,
            search_template: DEFAULT_SEARCH_URL.to_string(),
            state: RwLock::new(UiState::new()),
            listing: RequestSlot::new(),
            profile_slot: RequestSlot::new(),
            definition_slot: RequestSlot::new(),
            analysis_slot: RequestSlot::new(),
        }
    }

    /// Override the external term search template (`{term}` placeholder)
    pub fn with_search_url(mut self, template: impl Into<String>) -> Self {
        self.search_template = template.into();
        self
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Register an auth transition observer
    pub async fn on_auth_change<F>(&self, callback: F)
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.sessions.on_auth_change(callback).await;
    }

    /// Current session, if signed in
    pub async fn session(&self) -> Option<Session> {
        self.sessions.current().await
    }

    /// Snapshot of the view model
    pub async fn view(&self) -> UiState {
        self.state.read().await.clone()
    }

    /// Drain queued notices
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.write().await.notices)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.notify(Notice::alert(AuthError::InputMissing.sign_in_message()))
                .await;
            return Err(AuthError::InputMissing);
        }
        match self.identity.sign_in(email, password).await {
            Ok(grant) => {
                self.begin_session(grant).await;
                Ok(())
            }
            Err(err) => {
                warn!(provider = self.identity.provider_name(), error = %err, "sign-in failed");
                self.notify(Notice::alert(err.sign_in_message())).await;
                Err(err)
            }
        }
    }

    /// Create an account and sign it in
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.notify(Notice::alert(AuthError::InputMissing.sign_up_message()))
                .await;
            return Err(AuthError::InputMissing);
        }
        match self.identity.sign_up(email, password).await {
            Ok(grant) => {
                self.notify(Notice::alert(MSG_ACCOUNT_CREATED)).await;
                self.begin_session(grant).await;
                Ok(())
            }
            Err(err) => {
                warn!(provider = self.identity.provider_name(), error = %err, "sign-up failed");
                self.notify(Notice::alert(err.sign_up_message())).await;
                Err(err)
            }
        }
    }

    /// Sign out locally; remote failure is only logged
    pub async fn sign_out(&self) {
        let ended = self.sessions.invalidate().await;
        self.listing.invalidate();
        self.profile_slot.invalidate();
        self.definition_slot.invalidate();
        self.analysis_slot.invalidate();
        self.state.write().await.reset_signed_out();

        if let Some(session) = ended {
            if let Err(err) = self.identity.sign_out(&session).await {
                debug!(error = %err, "remote sign-out failed");
            }
        }
    }

    async fn begin_session(&self, grant: AuthGrant) {
        self.sessions
            .establish(grant.id_token, grant.user_id, grant.email)
            .await;
        self.state.write().await.enter_signed_in();
        self.refresh_profiles().await;
    }

    /// Reload the profile list and select the first entry
    ///
    /// Load failures are logged and show as an empty list.
    pub async fn refresh_profiles(&self) {
        let Some(session) = self.active_session().await else {
            debug!("profile refresh skipped without session");
            return;
        };
        let ticket = self.listing.issue();
        let profiles = match self.api.list_profiles(&session).await {
            Ok(profiles) => profiles,
            Err(err) => {
                warn!(error = %err, "Profile load error");
                Vec::new()
            }
        };
        if !Self::still_current(&session, &self.listing, ticket) {
            debug!("discarding stale profile list");
            return;
        }

        let first = profiles.first().map(|profile| profile.id.clone());
        self.state.write().await.profiles = profiles;
        match first {
            Some(profile_id) => {
                self.select_profile(&profile_id).await;
            }
            None => {
                self.profile_slot.invalidate();
                self.state.write().await.activate_profile(None);
            }
        }
    }

    /// Create a profile with the default relation
    ///
    /// A missing or blank name is a silent no-op (cancelled prompt).
    pub async fn create_profile(&self, name: Option<&str>) -> bool {
        let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
            return false;
        };
        let Some(session) = self.require_session().await else {
            return false;
        };
        match self
            .api
            .create_profile(&session, &NewProfile::named(name))
            .await
        {
            Ok(()) => {
                info!(name, "profile created");
                self.refresh_profiles().await;
                true
            }
            Err(err) => {
                warn!(error = %err, "profile creation failed");
                if session.is_active() {
                    self.notify(Notice::alert(MSG_CREATE_PROFILE_FAILED)).await;
                }
                false
            }
        }
    }

    /// Make a listed profile active and load its latest analysis
    ///
    /// Returns false if the id is not in the current list.
    pub async fn select_profile(&self, profile_id: &str) -> bool {
        let Some(session) = self.active_session().await else {
            return false;
        };
        let ticket = {
            let mut state = self.state.write().await;
            if !state.profiles.iter().any(|profile| profile.id == profile_id) {
                return false;
            }
            state.activate_profile(Some(profile_id.to_string()));
            self.profile_slot.issue()
        };

        let latest = self.api.latest_analysis(&session, profile_id).await;
        if !Self::still_current(&session, &self.profile_slot, ticket) {
            debug!(profile_id, "discarding stale latest analysis");
            return true;
        }
        match latest {
            Ok(Some(result)) => {
                self.state.write().await.show_analysis(render_analysis(&result));
            }
            Ok(None) => debug!(profile_id, "no prior analysis"),
            Err(err) => warn!(profile_id, error = %err, "latest analysis load failed"),
        }
        true
    }

    /// Upload a report for the active profile
    pub async fn analyze(&self, file: Option<UploadFile>) -> bool {
        let Some(file) = file else {
            self.notify(Notice::alert(MSG_NO_FILE)).await;
            return false;
        };
        let Some(session) = self.require_session().await else {
            return false;
        };
        let active = self.state.read().await.active_profile.clone();
        let Some(profile_id) = active else {
            self.notify(Notice::alert(MSG_NO_PROFILE)).await;
            return false;
        };

        let profile_ticket = self.profile_slot.current();
        let ticket = self.analysis_slot.issue();
        self.state.write().await.busy = true;

        let outcome = self.api.analyze(&session, &profile_id, &file).await;

        let mut state = self.state.write().await;
        if self.analysis_slot.is_current(ticket) {
            state.busy = false;
        }
        if !Self::still_current(&session, &self.analysis_slot, ticket)
            || !self.profile_slot.is_current(profile_ticket)
        {
            debug!(profile_id = %profile_id, "discarding stale analysis result");
            return false;
        }
        match outcome {
            Ok(result) => {
                info!(profile_id = %profile_id, "analysis received");
                state.show_analysis(render_analysis(&result));
                true
            }
            Err(err) => {
                warn!(profile_id = %profile_id, error = %err, "analysis failed");
                state.push_notice(Notice::alert(MSG_ANALYSIS_FAILED));
                false
            }
        }
    }

    /// Open the definition drawer for a term and look it up
    pub async fn show_definition(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        let Some(session) = self.require_session().await else {
            return false;
        };
        let ticket = self.definition_slot.issue();
        self.state.write().await.definition =
            Some(DefinitionPanel::loading(term, &self.search_template));

        let outcome = self.api.define(&session, term).await;

        let mut state = self.state.write().await;
        if !Self::still_current(&session, &self.definition_slot, ticket) {
            debug!(term, "discarding stale definition");
            return false;
        }
        let Some(panel) = state.definition.as_mut().filter(|panel| panel.term == term) else {
            debug!(term, "definition drawer no longer shows this term");
            return false;
        };
        match outcome {
            Ok(definition) => {
                panel.status = DefinitionStatus::Loaded(definition);
                true
            }
            Err(err) => {
                warn!(term, error = %err, "definition lookup failed");
                panel.status = DefinitionStatus::Failed(MSG_DEFINITION_FAILED.to_string());
                false
            }
        }
    }

    /// Close the drawer; lookups still in flight are dropped
    pub async fn close_definition(&self) {
        self.definition_slot.invalidate();
        self.state.write().await.definition = None;
    }

    /// Send a chat message scoped to the active profile
    ///
    /// Blank input does nothing. On success the message and the reply are
    /// appended together; on failure the transcript is left as is.
    pub async fn send_chat(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let Some(session) = self.require_session().await else {
            return false;
        };
        let profile_ticket = self.profile_slot.current();
        let profile_id = self.state.read().await.active_profile.clone();

        let outcome = self
            .api
            .send_message(&session, text, profile_id.as_deref())
            .await;
        if !Self::still_current(&session, &self.profile_slot, profile_ticket) {
            debug!("discarding chat reply for previous profile");
            return false;
        }
        let mut state = self.state.write().await;
        match outcome {
            Ok(reply) => {
                state.transcript.push_exchange(text, reply);
                true
            }
            Err(err) => {
                warn!(error = %err, "chat failed");
                state.push_notice(Notice::inline(MSG_CHAT_FAILED));
                false
            }
        }
    }

    async fn active_session(&self) -> Option<Session> {
        self.sessions.current().await.filter(Session::is_active)
    }

    /// Active session, or an alert asking the user to sign in
    async fn require_session(&self) -> Option<Session> {
        let session = self.active_session().await;
        if session.is_none() {
            self.notify(Notice::alert(MSG_SIGN_IN_REQUIRED)).await;
        }
        session
    }

    async fn notify(&self, notice: Notice) {
        self.state.write().await.push_notice(notice);
    }

    fn still_current(session: &Session, slot: &RequestSlot, ticket: RequestTicket) -> bool {
        session.is_active() && slot.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StubIdentity;
    use crate::transport::{FakeReply, FakeTransport, Method, Transport};

    fn app(fake: &FakeTransport) -> App {
        App::new(
            Identity::Stub(StubIdentity::new("dev-token")),
            ApiClient::new("http://backend", Transport::Fake(fake.clone())),
        )
    }

    #[tokio::test]
    async fn test_sign_in_requires_both_fields() {
        let fake = FakeTransport::new();
        let app = app(&fake);

        assert_eq!(app.sign_in("", "pw").await, Err(AuthError::InputMissing));
        assert_eq!(
            app.take_notices().await,
            vec![Notice::alert("Please enter email and password.")]
        );
        assert!(app.session().await.is_none());
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_with_no_profiles() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles", FakeReply::json(serde_json::json!([])));
        let app = app(&fake);

        app.sign_in("me@example.com", "pw").await.unwrap();
        let view = app.view().await;
        assert!(!view.sections.login);
        assert!(view.sections.upload && view.sections.logout);
        assert!(view.active_profile.is_none());
        assert_eq!(fake.request_count(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_actions_fail_closed() {
        let fake = FakeTransport::new();
        let app = app(&fake);

        assert!(!app.send_chat("hello").await);
        assert!(!app.show_definition("TSH").await);
        assert!(!app.create_profile(Some("Dad")).await);
        assert!(!app.analyze(Some(UploadFile::new("a.pdf", vec![1]))).await);
        app.refresh_profiles().await;

        assert_eq!(fake.request_count(), 0);
        let notices = app.take_notices().await;
        assert!(notices.iter().all(|n| n.text() == MSG_SIGN_IN_REQUIRED));
    }

    #[tokio::test]
    async fn test_blank_chat_is_ignored() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles", FakeReply::json(serde_json::json!([])));
        let app = app(&fake);
        app.sign_in("me@example.com", "pw").await.unwrap();
        let before = app.view().await;

        assert!(!app.send_chat("   ").await);
        assert_eq!(app.view().await, before);
        assert_eq!(fake.requests_to("/chat").len(), 0);
    }

    #[tokio::test]
    async fn test_close_definition_drops_panel() {
        let fake = FakeTransport::new();
        fake.always(Method::Get, "/profiles", FakeReply::json(serde_json::json!([])));
        fake.always(
            Method::Post,
            "/define",
            FakeReply::json(serde_json::json!({"definition": "Thyroid test"})),
        );
        let app = app(&fake);
        app.sign_in("me@example.com", "pw").await.unwrap();

        assert!(app.show_definition("TSH").await);
        let panel = app.view().await.definition.unwrap();
        assert_eq!(panel.status, DefinitionStatus::Loaded("Thyroid test".to_string()));
        assert_eq!(
            panel.search_url.as_deref(),
            Some("https://medlineplus.gov/search?searchquery=TSH")
        );

        app.close_definition().await;
        assert!(app.view().await.definition.is_none());
    }
}
