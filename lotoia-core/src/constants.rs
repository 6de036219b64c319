//! Centralized timing, capacity and storage-key constants for the simulator.
//!
//! Storage keys are grouped by the module that owns them. Two modules never
//! write the same key, so browser storage needs no coordination.

// Timing -------------------------------------------------------------------
/// Quiet period after the last selection change before an analysis fires.
pub const DEBOUNCE_MS: u32 = 300;
/// Default duration of the sponsor animation when the page enables it.
pub const SPONSOR_GATE_MS: u32 = 3_000;
/// Session age before the rating banner may appear.
pub const RATING_BANNER_DELAY_MS: i64 = 45_000;

// Capacities ---------------------------------------------------------------
/// Chat turns kept in session storage.
pub const CHAT_HISTORY_CAP: usize = 50;
/// Chat turns sent with each chat request.
pub const CHAT_PAYLOAD_TAIL: usize = 20;
/// Consent records expire after this many days.
pub const CONSENT_TTL_DAYS: i64 = 180;
pub const MS_PER_DAY: i64 = 86_400_000;

// Storage keys: session ----------------------------------------------------
pub const KEY_SESSION_ID: &str = "lotoia.session_id";
pub const KEY_SESSION_START: &str = "lotoia.session_start";
pub const KEY_CHAT_PREFIX: &str = "lotoia.chat.";

// Storage keys: local ------------------------------------------------------
pub const KEY_THEME: &str = "lotoia.theme";
pub const KEY_LOCALE: &str = "lotoia.locale";
pub const KEY_CONSENT: &str = "lotoia.consent";
pub const KEY_RATED_PREFIX: &str = "lotoia.rated.";
