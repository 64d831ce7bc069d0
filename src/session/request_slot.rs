//! Request identifiers for slot-based UI state
//!
//! Each slot (definition panel, profile view, analysis upload) issues a
//! ticket per request. A completion is applied only while its ticket is
//! still the latest one issued for that slot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct RequestSlot {
    latest: AtomicU64,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Ticket of the latest issued request (without superseding it)
    pub fn current(&self) -> RequestTicket {
        RequestTicket(self.latest.load(Ordering::Acquire))
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Supersede all outstanding tickets without issuing a new request
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}
