//! Sequencing of backend requests so late responses cannot clobber newer state.
use serde::{Deserialize, Serialize};

use crate::selection::SelectionSnapshot;

/// Tag carried by a request and echoed back with its response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTicket {
    pub seq: u64,
    pub snapshot: SelectionSnapshot,
}

/// Why a response was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// A newer request was issued, or the ledger was invalidated.
    Superseded,
    /// The selection changed after the request went out.
    SelectionChanged,
}

/// Tracks the latest issued request of one kind.
#[derive(Debug, Clone, Default)]
pub struct RequestLedger {
    issued: u64,
    latest: Option<u64>,
}

impl RequestLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, snapshot: SelectionSnapshot) -> RequestTicket {
        self.issued += 1;
        self.latest = Some(self.issued);
        RequestTicket {
            seq: self.issued,
            snapshot,
        }
    }

    /// Forget the in-flight request; its response will be refused.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    #[must_use]
    pub fn is_latest(&self, ticket: &RequestTicket) -> bool {
        self.latest == Some(ticket.seq)
    }

    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.latest.is_some()
    }

    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.issued
    }

    /// Close out `ticket` and decide whether its payload may be applied.
    ///
    /// # Errors
    ///
    /// Returns the [`Staleness`] reason when the response must be discarded.
    pub fn settle(
        &mut self,
        ticket: &RequestTicket,
        current: &SelectionSnapshot,
    ) -> Result<(), Staleness> {
        if !self.is_latest(ticket) {
            return Err(Staleness::Superseded);
        }
        self.latest = None;
        if &ticket.snapshot == current {
            Ok(())
        } else {
            Err(Staleness::SelectionChanged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(primary: &[u8]) -> SelectionSnapshot {
        SelectionSnapshot {
            primary: primary.to_vec(),
            secondary: vec![1],
        }
    }

    #[test]
    fn only_latest_ticket_settles() {
        let mut ledger = RequestLedger::new();
        let a = ledger.issue(snap(&[1, 2, 3, 4, 5]));
        let b = ledger.issue(snap(&[1, 2, 3, 4, 6]));
        assert_eq!(
            ledger.settle(&a, &snap(&[1, 2, 3, 4, 6])),
            Err(Staleness::Superseded)
        );
        assert_eq!(ledger.settle(&b, &snap(&[1, 2, 3, 4, 6])), Ok(()));
        assert!(!ledger.in_flight());
        assert_eq!(
            ledger.settle(&b, &snap(&[1, 2, 3, 4, 6])),
            Err(Staleness::Superseded)
        );
    }

    #[test]
    fn changed_selection_refuses_latest_response() {
        let mut ledger = RequestLedger::new();
        let a = ledger.issue(snap(&[1, 2, 3, 4, 5]));
        assert_eq!(
            ledger.settle(&a, &snap(&[1, 2, 3, 4])),
            Err(Staleness::SelectionChanged)
        );
    }

    #[test]
    fn invalidate_refuses_in_flight_response() {
        let mut ledger = RequestLedger::new();
        let a = ledger.issue(SelectionSnapshot::default());
        ledger.invalidate();
        assert_eq!(
            ledger.settle(&a, &SelectionSnapshot::default()),
            Err(Staleness::Superseded)
        );
        assert_eq!(ledger.issued(), 1);
    }
}
