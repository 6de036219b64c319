//! Chat widget history and wire types.
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::api::{ApiError, parse_envelope};
use crate::constants::{CHAT_HISTORY_CAP, CHAT_PAYLOAD_TAIL, KEY_CHAT_PREFIX};
use crate::game::GameKind;
use crate::session::SessionId;
use crate::storage::{KeyValueStore, load_json, save_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    /// Shown in the log but never sent back as conversation context.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub notice: bool,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            notice: false,
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            notice: false,
        }
    }

    /// Client-side assistant line, e.g. a failed request.
    #[must_use]
    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            notice: true,
            ..Self::assistant(content)
        }
    }
}

/// Conversation for one game, oldest turn first, never longer than the cap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: VecDeque<ChatTurn>,
}

impl ChatHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn storage_key(kind: GameKind) -> String {
        format!("{KEY_CHAT_PREFIX}{}", kind.slug())
    }

    /// Stored history for `kind`, trimmed in case an older build stored more.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, kind: GameKind) -> Self {
        let mut history: Self = load_json(store, &Self::storage_key(kind)).unwrap_or_default();
        history.trim();
        history
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S, kind: GameKind) {
        save_json(store, &Self::storage_key(kind), self);
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push_back(turn);
        self.trim();
    }

    fn trim(&mut self) {
        while self.turns.len() > CHAT_HISTORY_CAP {
            self.turns.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent real turns sent as conversation context, oldest first.
    #[must_use]
    pub fn payload_tail(&self) -> Vec<ChatTurn> {
        let mut tail: Vec<ChatTurn> = self
            .turns
            .iter()
            .rev()
            .filter(|turn| !turn.notice)
            .take(CHAT_PAYLOAD_TAIL)
            .cloned()
            .collect();
        tail.reverse();
        tail
    }
}

/// Body of a `hybride-chat` POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
    pub session_id: String,
}

impl ChatRequest {
    /// `history` is the conversation before `message` was typed.
    #[must_use]
    pub fn new(message: &str, history: &ChatHistory, session: &SessionId) -> Self {
        Self {
            message: message.trim().to_string(),
            history: history.payload_tail(),
            session_id: session.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    #[serde(alias = "reply", alias = "message")]
    pub response: String,
}

impl ChatReply {
    /// # Errors
    ///
    /// Returns the envelope errors of [`parse_envelope`], or
    /// [`ApiError::Empty`] for a blank reply.
    pub fn from_envelope(text: &str) -> Result<Self, ApiError> {
        let reply: Self = parse_envelope(text)?;
        if reply.response.trim().is_empty() {
            return Err(ApiError::Empty);
        }
        Ok(reply)
    }
}
