//! Althea: terminal client for the Althea medical report service
//!
//! Signs the caller in through an identity provider, then drives the
//! report backend: family profiles, document analysis, term definitions
//! and chat, all scoped to an explicit `Session`.

pub mod api;
pub mod cli;
pub mod identity;
pub mod session;
pub mod transport;
pub mod ui;

// Re-export the main entry points for convenience
pub use api::{AnalysisResult, ApiClient, ClientError, NewProfile, Profile, UploadFile};
pub use identity::{AuthError, AuthGrant, Identity, IdentityProvider};
pub use session::{AuthState, Session, SessionManager};
pub use transport::{FakeReply, FakeTransport, Transport, TransportError};
pub use ui::{App, Notice, UiState};
