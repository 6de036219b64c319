//! Debounce and sponsor-gate phases of the analysis pipeline.
//!
//! Timers are owned by the platform. The debouncer only hands out tickets and
//! decides, when a timer or gate reports back, whether that ticket is still
//! current. Anything carrying an older ticket is ignored.
use serde::{Deserialize, Serialize};

/// Identifies one scheduled debounce fire. Strictly increasing per debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DebounceTicket(u64);

impl DebounceTicket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Whether a scheduled fire must pass through the sponsor gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatePolicy {
    Required,
    Bypass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateOutcome {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DebouncePhase {
    #[default]
    Idle,
    Scheduled {
        ticket: DebounceTicket,
        gate: GatePolicy,
    },
    AwaitingGate {
        ticket: DebounceTicket,
    },
    Analyzing {
        ticket: DebounceTicket,
    },
}

impl DebouncePhase {
    #[must_use]
    pub const fn ticket(self) -> Option<DebounceTicket> {
        match self {
            Self::Idle => None,
            Self::Scheduled { ticket, .. }
            | Self::AwaitingGate { ticket }
            | Self::Analyzing { ticket } => Some(ticket),
        }
    }

    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// What the platform should do after a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireStep {
    /// The ticket was superseded; do nothing.
    Ignored,
    OpenGate(DebounceTicket),
    Analyze(DebounceTicket),
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisDebouncer {
    phase: DebouncePhase,
    issued: u64,
}

impl AnalysisDebouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> DebouncePhase {
        self.phase
    }

    /// React to a selection change. Any pending fire or open gate is dropped;
    /// a complete selection gets a fresh ticket to arm a timer with.
    pub fn selection_changed(&mut self, complete: bool, gate: GatePolicy) -> Option<DebounceTicket> {
        if !complete {
            self.phase = DebouncePhase::Idle;
            return None;
        }
        self.issued += 1;
        let ticket = DebounceTicket(self.issued);
        self.phase = DebouncePhase::Scheduled { ticket, gate };
        Some(ticket)
    }

    pub fn elapsed(&mut self, ticket: DebounceTicket) -> FireStep {
        match self.phase {
            DebouncePhase::Scheduled { ticket: current, gate } if current == ticket => match gate {
                GatePolicy::Required => {
                    self.phase = DebouncePhase::AwaitingGate { ticket };
                    FireStep::OpenGate(ticket)
                }
                GatePolicy::Bypass => {
                    self.phase = DebouncePhase::Analyzing { ticket };
                    FireStep::Analyze(ticket)
                }
            },
            _ => FireStep::Ignored,
        }
    }

    /// Returns the ticket to analyze with when the gate completed for the
    /// current grid. Cancellation drops back to idle.
    pub fn gate_resolved(
        &mut self,
        ticket: DebounceTicket,
        outcome: GateOutcome,
    ) -> Option<DebounceTicket> {
        match self.phase {
            DebouncePhase::AwaitingGate { ticket: current } if current == ticket => match outcome {
                GateOutcome::Completed => {
                    self.phase = DebouncePhase::Analyzing { ticket };
                    Some(ticket)
                }
                GateOutcome::Cancelled => {
                    self.phase = DebouncePhase::Idle;
                    None
                }
            },
            _ => None,
        }
    }

    /// The in-flight analysis finished, successfully or not.
    pub fn settled(&mut self) {
        if matches!(self.phase, DebouncePhase::Analyzing { .. }) {
            self.phase = DebouncePhase::Idle;
        }
    }

    pub fn cancel(&mut self) {
        self.phase = DebouncePhase::Idle;
    }
}
