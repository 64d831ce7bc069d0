//! Session lifecycle
//!
//! - `Session`: explicit caller context passed to every request client
//! - `SessionManager`: creates sessions on sign-in, revokes them on sign-out
//! - `RequestSlot`: per-slot request identifiers for discarding stale replies

mod request_slot;
mod session_state;

pub use request_slot::{RequestSlot, RequestTicket};
pub use session_state::{AuthState, Session, SessionManager};
