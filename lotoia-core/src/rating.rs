//! Rating banner timing and submission payload.
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, parse_envelope};
use crate::constants::{KEY_RATED_PREFIX, KEY_SESSION_START, RATING_BANNER_DELAY_MS};
use crate::game::GameKind;
use crate::session::SessionId;
use crate::storage::{KeyValueStore, load_json, save_json};

pub const RATING_PATH: &str = "/api/rating";
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Epoch ms of the first page view in this tab, recorded on first call.
pub fn session_start<S: KeyValueStore + ?Sized>(store: &S, now_ms: i64) -> i64 {
    if let Some(start) = load_json::<i64, _>(store, KEY_SESSION_START) {
        return start;
    }
    save_json(store, KEY_SESSION_START, &now_ms);
    now_ms
}

/// Banner state for one rating source (a simulator page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingPrompt {
    source: String,
}

impl RatingPrompt {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    #[must_use]
    pub fn for_simulator(kind: GameKind) -> Self {
        Self::new(format!("simulator-{}", kind.slug()))
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn rated_key(&self) -> String {
        format!("{KEY_RATED_PREFIX}{}", self.source)
    }

    #[must_use]
    pub fn already_rated<S: KeyValueStore + ?Sized>(&self, store: &S) -> bool {
        load_json::<bool, _>(store, &self.rated_key()).unwrap_or(false)
    }

    /// Milliseconds until the banner may show, `None` once rated.
    #[must_use]
    pub fn remaining_delay<S, T>(&self, local: &S, session: &T, now_ms: i64) -> Option<i64>
    where
        S: KeyValueStore + ?Sized,
        T: KeyValueStore + ?Sized,
    {
        if self.already_rated(local) {
            return None;
        }
        let age = now_ms.saturating_sub(session_start(session, now_ms));
        Some(RATING_BANNER_DELAY_MS.saturating_sub(age).clamp(0, RATING_BANNER_DELAY_MS))
    }

    pub fn mark_rated<S: KeyValueStore + ?Sized>(&self, store: &S) {
        save_json(store, &self.rated_key(), &true);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRequest {
    pub source: String,
    pub rating: u8,
    pub session_id: String,
    pub page: String,
}

impl RatingRequest {
    #[must_use]
    pub fn new(prompt: &RatingPrompt, rating: u8, session: &SessionId, page: &str) -> Self {
        Self {
            source: prompt.source().to_string(),
            rating: rating.clamp(MIN_RATING, MAX_RATING),
            session_id: session.as_str().to_string(),
            page: page.to_string(),
        }
    }
}

/// # Errors
///
/// Returns the envelope errors of [`parse_envelope`].
pub fn parse_rating_reply(text: &str) -> Result<(), ApiError> {
    parse_envelope::<serde_json::Value>(text).map(|_| ())
}
