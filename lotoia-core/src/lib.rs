//! LotoIA simulator core
//!
//! Platform-agnostic logic for the LotoIA grid simulators: grid rules and
//! selection, heat and analysis models, the debounced analysis pipeline and
//! the small pieces of state the site keeps in browser storage.
//! This crate never touches the DOM or the network; the platform executes the
//! [`Effect`]s returned by [`Simulator::apply`] and feeds results back.

pub mod analysis;
pub mod api;
pub mod chat;
pub mod consent;
pub mod constants;
pub mod debounce;
pub mod game;
pub mod heat;
pub mod numbers;
pub mod presentation;
pub mod rating;
pub mod request;
pub mod selection;
pub mod session;
pub mod simulator;
pub mod storage;

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, Badge, BadgeKind, HistoryCheck, MetricKey, MetricValue, Severity, Suggestion,
    SuggestionTone,
};
pub use api::{AnalyzeQuery, ApiError, DatabaseInfo, GeneratedGrid, parse_envelope};
pub use chat::{ChatHistory, ChatReply, ChatRequest, ChatRole, ChatTurn};
pub use consent::{ConsentChoice, ConsentRecord};
pub use debounce::{AnalysisDebouncer, DebouncePhase, DebounceTicket, GateOutcome, GatePolicy};
pub use game::{Category, GameKind, GridRules};
pub use heat::{HeatCategory, HeatInfo, HeatMap};
pub use presentation::{
    BadgeView, ConvergenceTier, HistoryLine, Light, MetricBands, MetricView, NumberCell,
    ResultView, SuggestionPanel, grid_cells,
};
pub use rating::{RatingPrompt, RatingRequest};
pub use request::{RequestLedger, RequestTicket};
pub use selection::{SelectionSnapshot, SelectionState};
pub use session::SessionId;
pub use simulator::{Action, Effect, GateMode, Simulator, SimulatorStats};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
