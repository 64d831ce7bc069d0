//! Session state
//!
//! The caller's identity token lives in an explicit `Session` value that is
//! handed to every request client. `SessionManager` owns its lifecycle:
//! creation on sign-in, revocation on sign-out.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

/// Authenticated caller context
///
/// Cheap to clone. Clones share a revocation flag, so a clone held by an
/// in-flight request observes a later sign-out.
#[derive(Clone)]
pub struct Session {
    token: String,
    user_id: String,
    email: String,
    generation: u64,
    revoked: Arc<AtomicBool>,
}

impl Session {
    fn new(token: String, user_id: String, email: String, generation: u64) -> Self {
        Self {
            token,
            user_id,
            email,
            generation,
            revoked: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Opaque identity token attached to backend calls
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Sign-in counter value this session was created under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the session has been signed out or replaced
    pub fn is_active(&self) -> bool {
        !self.revoked.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.revoked.store(true, Ordering::Release);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("generation", &self.generation)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Sign-in state delivered to observers
#[derive(Debug, Clone)]
pub enum AuthState {
    SignedIn(Session),
    SignedOut,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }
}

type AuthObserver = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Session lifecycle owner
#[derive(Default)]
pub struct SessionManager {
    current: RwLock<Option<Session>>,
    generation: AtomicU64,
    observers: RwLock<Vec<AuthObserver>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer invoked on every sign-in/sign-out transition
    pub async fn on_auth_change<F>(&self, callback: F)
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.observers.write().await.push(Box::new(callback));
    }

    /// Create a session from a successful sign-in
    ///
    /// Any previous session is revoked first.
    pub async fn establish(&self, token: String, user_id: String, email: String) -> Session {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let session = Session::new(token, user_id, email, generation);

        let previous = self.current.write().await.replace(session.clone());
        if let Some(previous) = previous {
            previous.revoke();
        }

        info!(user_id = %session.user_id, generation, "session established");
        self.notify(&AuthState::SignedIn(session.clone())).await;
        session
    }

    /// Revoke the current session
    ///
    /// Returns the revoked session, or `None` if nobody was signed in
    /// (observers are only notified on an actual transition).
    pub async fn invalidate(&self) -> Option<Session> {
        let previous = self.current.write().await.take()?;
        previous.revoke();

        info!(user_id = %previous.user_id, "session invalidated");
        self.notify(&AuthState::SignedOut).await;
        Some(previous)
    }

    /// Current session, if signed in
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn notify(&self, state: &AuthState) {
        for observer in self.observers.read().await.iter() {
            observer(state);
        }
    }
}
