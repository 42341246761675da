//! Latest-request guard
//!
//! A list view issues a ticket when it starts a fetch. Starting another fetch
//! (new store, new search term) supersedes every earlier ticket, and a
//! response that arrives with a superseded ticket is dropped instead of
//! overwriting newer data. Requests are not aborted.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation handed out by [`LatestRequest::begin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Shared generation counter; clones observe the same generation
#[derive(Debug, Clone, Default)]
pub struct LatestRequest {
    generation: Arc<AtomicU64>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding all outstanding tickets
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let guard = LatestRequest::new();
        let first = guard.begin();
        assert!(guard.is_current(first));
        let second = guard.begin();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_clones_share_generation() {
        let guard = LatestRequest::new();
        let ticket = guard.begin();
        let other = guard.clone();
        let newer = other.begin();
        assert!(!guard.is_current(ticket));
        assert!(guard.is_current(newer));
    }
}
