//! Staleness guard for overlapping generation requests.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Hands out increasing tickets and accepts results only for the latest one.
///
/// A slow response to an earlier request can then never replace the result
/// of a newer one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding all earlier ones.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `result` through if `ticket` is still current, drop it otherwise.
    pub fn accept<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_tickets_increase() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(second > first);
        assert_eq!(first.id(), 1);
    }

    #[test]
    fn test_latest_ticket_accepted() {
        let sequencer = RequestSequencer::new();
        let ticket = sequencer.begin();

        assert_eq!(sequencer.accept(ticket, "skeleton"), Some("skeleton"));
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let sequencer = RequestSequencer::new();
        let slow = sequencer.begin();
        let fast = sequencer.begin();

        // The newer request finishes first, then the old one arrives
        assert_eq!(sequencer.accept(fast, "new"), Some("new"));
        assert_eq!(sequencer.accept(slow, "old"), None);
    }

    #[test]
    fn test_concurrent_begin_is_unique() {
        let sequencer = Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequencer = Arc::clone(&sequencer);
                std::thread::spawn(move || (0..100).map(|_| sequencer.begin().id()).collect::<Vec<_>>())
            })
            .collect();

        let mut ids: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 800);
        assert!(sequencer.is_current(RequestTicket(800)));
    }
}
