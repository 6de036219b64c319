//! Per-tab session identifier.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::KEY_SESSION_ID;
use crate::storage::{KeyValueStore, load_json, save_json};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Derive an id from platform entropy folded into a seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let body: String = (0..ID_LEN)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();
        Self(format!("sess_{body}"))
    }

    /// Reuse the id stored for this tab, or mint and store a new one.
    pub fn load_or_create<S: KeyValueStore + ?Sized>(store: &S, seed: u64) -> Self {
        if let Some(id) = load_json::<Self, _>(store, KEY_SESSION_ID).filter(|id| !id.0.is_empty())
        {
            return id;
        }
        let id = Self::from_seed(seed);
        save_json(store, KEY_SESSION_ID, &id);
        id
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
