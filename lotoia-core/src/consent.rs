//! Cookie-consent record with an explicit expiry.
use serde::{Deserialize, Serialize};

use crate::constants::{CONSENT_TTL_DAYS, KEY_CONSENT, MS_PER_DAY};
use crate::storage::{KeyValueStore, load_json, save_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentChoice {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub choice: ConsentChoice,
    pub decided_at_ms: i64,
    pub expires_at_ms: i64,
}

impl ConsentRecord {
    #[must_use]
    pub const fn new(choice: ConsentChoice, now_ms: i64) -> Self {
        Self {
            choice,
            decided_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(CONSENT_TTL_DAYS * MS_PER_DAY),
        }
    }

    #[must_use]
    pub const fn is_valid(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms
    }

    /// Unexpired stored record; expired ones are treated as absent.
    pub fn load_valid<S: KeyValueStore + ?Sized>(store: &S, now_ms: i64) -> Option<Self> {
        load_json::<Self, _>(store, KEY_CONSENT).filter(|record| record.is_valid(now_ms))
    }

    /// Record a decision and return it.
    pub fn decide<S: KeyValueStore + ?Sized>(store: &S, choice: ConsentChoice, now_ms: i64) -> Self {
        let record = Self::new(choice, now_ms);
        save_json(store, KEY_CONSENT, &record);
        log::info!("consent {choice:?} recorded");
        record
    }

    #[must_use]
    pub fn analytics_allowed(&self) -> bool {
        self.choice == ConsentChoice::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const NOW: i64 = 1_750_000_000_000;

    #[test]
    fn decision_survives_until_expiry() {
        let store = MemoryStore::new();
        ConsentRecord::decide(&store, ConsentChoice::Accepted, NOW);
        let record = ConsentRecord::load_valid(&store, NOW + MS_PER_DAY).unwrap();
        assert!(record.analytics_allowed());

        let expiry = NOW + CONSENT_TTL_DAYS * MS_PER_DAY;
        assert!(ConsentRecord::load_valid(&store, expiry - 1).is_some());
        assert!(ConsentRecord::load_valid(&store, expiry).is_none());
    }

    #[test]
    fn missing_or_malformed_record_is_absent() {
        let store = MemoryStore::new();
        assert!(ConsentRecord::load_valid(&store, NOW).is_none());
        store.set_raw(KEY_CONSENT, "\"yes\"").unwrap();
        assert!(ConsentRecord::load_valid(&store, NOW).is_none());
    }

    #[test]
    fn declined_disallows_analytics() {
        assert!(!ConsentRecord::new(ConsentChoice::Declined, NOW).analytics_allowed());
    }
}
