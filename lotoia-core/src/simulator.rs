//! Grid simulator controller.
//!
//! [`Simulator`] is a synchronous state machine: the platform feeds it
//! [`Action`]s (clicks, timer fires, network completions) and executes the
//! [`Effect`]s it returns. Completions re-enter as actions, so the simulator
//! itself never awaits anything.
use serde::Serialize;

use crate::analysis::AnalysisResult;
use crate::api::{AnalyzeQuery, ApiError, DatabaseInfo, GeneratedGrid};
use crate::constants::{DEBOUNCE_MS, SPONSOR_GATE_MS};
use crate::debounce::{
    AnalysisDebouncer, DebouncePhase, DebounceTicket, FireStep, GateOutcome, GatePolicy,
};
use crate::game::{Category, GameKind};
use crate::heat::HeatMap;
use crate::presentation::{MetricBands, ResultView};
use crate::request::{RequestLedger, RequestTicket, Staleness};
use crate::selection::{SelectionSnapshot, SelectionState};

/// Whether completed grids pass through the sponsor gate on this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum GateMode {
    #[default]
    Enabled,
    Disabled,
}

impl GateMode {
    const fn policy(self) -> GatePolicy {
        match self {
            Self::Enabled => GatePolicy::Required,
            Self::Disabled => GatePolicy::Bypass,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePrimary(u8),
    ToggleSecondary(u8),
    Reset,
    AutoGenerate,
    DebounceElapsed(DebounceTicket),
    GateResolved {
        ticket: DebounceTicket,
        outcome: GateOutcome,
    },
    AnalysisArrived {
        ticket: RequestTicket,
        result: Result<AnalysisResult, ApiError>,
    },
    GridGenerated {
        ticket: RequestTicket,
        grid: Result<GeneratedGrid, ApiError>,
    },
    HeatLoaded(Result<HeatMap, ApiError>),
    DatabaseInfoLoaded(Result<DatabaseInfo, ApiError>),
}

/// Work the platform must perform on the simulator's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm a timer and report back with [`Action::DebounceElapsed`].
    ScheduleDebounce {
        ticket: DebounceTicket,
        delay_ms: u32,
    },
    /// Show the sponsor gate and report back with [`Action::GateResolved`].
    OpenGate {
        ticket: DebounceTicket,
        duration_ms: u32,
    },
    /// POST the analyze-grid request and report back with
    /// [`Action::AnalysisArrived`].
    Analyze {
        ticket: RequestTicket,
        path: String,
    },
    /// GET a random grid and report back with [`Action::GridGenerated`].
    Generate { ticket: RequestTicket, path: String },
}

/// Running counters, surfaced by the tester and in debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SimulatorStats {
    pub requests_issued: u32,
    pub results_applied: u32,
    pub stale_discarded: u32,
    pub failures: u32,
    pub gates_opened: u32,
    pub gates_cancelled: u32,
    pub grids_generated: u32,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    kind: GameKind,
    gate_mode: GateMode,
    selection: SelectionState,
    heat: HeatMap,
    database_info: Option<DatabaseInfo>,
    result: Option<AnalysisResult>,
    result_serial: u64,
    debouncer: AnalysisDebouncer,
    analyses: RequestLedger,
    generations: RequestLedger,
    stats: SimulatorStats,
}

impl Simulator {
    #[must_use]
    pub fn new(kind: GameKind, gate_mode: GateMode) -> Self {
        Self {
            kind,
            gate_mode,
            selection: SelectionState::for_game(kind),
            heat: HeatMap::neutral(),
            database_info: None,
            result: None,
            result_serial: 0,
            debouncer: AnalysisDebouncer::new(),
            analyses: RequestLedger::new(),
            generations: RequestLedger::new(),
            stats: SimulatorStats::default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GameKind {
        self.kind
    }

    #[must_use]
    pub const fn gate_mode(&self) -> GateMode {
        self.gate_mode
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub const fn heat(&self) -> &HeatMap {
        &self.heat
    }

    #[must_use]
    pub const fn database_info(&self) -> Option<&DatabaseInfo> {
        self.database_info.as_ref()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Bumped on every applied result; keys the results-panel transition.
    #[must_use]
    pub const fn result_serial(&self) -> u64 {
        self.result_serial
    }

    #[must_use]
    pub fn result_view(&self, bands: &MetricBands) -> Option<ResultView> {
        self.result
            .as_ref()
            .map(|result| ResultView::build(self.kind, result, bands))
    }

    #[must_use]
    pub const fn phase(&self) -> DebouncePhase {
        self.debouncer.phase()
    }

    #[must_use]
    pub const fn stats(&self) -> SimulatorStats {
        self.stats
    }

    #[must_use]
    pub const fn is_generating(&self) -> bool {
        self.generations.in_flight()
    }

    /// The two mount-time loads. Their results re-enter as
    /// [`Action::HeatLoaded`] and [`Action::DatabaseInfoLoaded`].
    #[must_use]
    pub fn mount_paths(&self) -> (String, String) {
        (self.kind.heat_path(), self.kind.database_info_path())
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::TogglePrimary(n) => self.toggle(Category::Primary, n),
            Action::ToggleSecondary(n) => self.toggle(Category::Secondary, n),
            Action::Reset => {
                self.reset();
                Vec::new()
            }
            Action::AutoGenerate => self.auto_generate(),
            Action::DebounceElapsed(ticket) => self.debounce_elapsed(ticket),
            Action::GateResolved { ticket, outcome } => self.gate_resolved(ticket, outcome),
            Action::AnalysisArrived { ticket, result } => {
                self.analysis_arrived(&ticket, result);
                Vec::new()
            }
            Action::GridGenerated { ticket, grid } => self.grid_generated(&ticket, grid),
            Action::HeatLoaded(heat) => {
                self.heat = heat.unwrap_or_else(|err| {
                    log::warn!("{} heat load failed, using neutral heat: {err}", self.kind);
                    HeatMap::neutral()
                });
                Vec::new()
            }
            Action::DatabaseInfoLoaded(info) => {
                self.database_info = match info {
                    Ok(info) if info.is_displayable() => Some(info),
                    Ok(_) => None,
                    Err(err) => {
                        log::warn!("{} database info load failed: {err}", self.kind);
                        None
                    }
                };
                Vec::new()
            }
        }
    }

    fn toggle(&mut self, category: Category, n: u8) -> Vec<Effect> {
        if !self.selection.rules().accepts(category, n) {
            log::warn!("ignoring out-of-range {category:?} number {n}");
            return Vec::new();
        }
        let before = self.selection.is_selected(category, n);
        if self.selection.toggle(category, n) == before {
            return Vec::new();
        }
        self.selection_changed(self.gate_mode.policy())
    }

    fn selection_changed(&mut self, gate: GatePolicy) -> Vec<Effect> {
        self.debouncer
            .selection_changed(self.selection.is_complete(), gate)
            .map(|ticket| Effect::ScheduleDebounce {
                ticket,
                delay_ms: DEBOUNCE_MS,
            })
            .into_iter()
            .collect()
    }

    fn reset(&mut self) {
        self.selection.reset();
        self.result = None;
        self.debouncer.cancel();
        self.analyses.invalidate();
        self.generations.invalidate();
    }

    fn auto_generate(&mut self) -> Vec<Effect> {
        let ticket = self.generations.issue(SelectionSnapshot::default());
        vec![Effect::Generate {
            ticket,
            path: self.kind.generate_path(),
        }]
    }

    fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Vec<Effect> {
        match self.debouncer.elapsed(ticket) {
            FireStep::Ignored => {
                log::debug!("debounce ticket {} superseded", ticket.value());
                Vec::new()
            }
            FireStep::OpenGate(ticket) => {
                self.stats.gates_opened += 1;
                vec![Effect::OpenGate {
                    ticket,
                    duration_ms: SPONSOR_GATE_MS,
                }]
            }
            FireStep::Analyze(_) => vec![self.issue_analysis()],
        }
    }

    fn gate_resolved(&mut self, ticket: DebounceTicket, outcome: GateOutcome) -> Vec<Effect> {
        let current = self.debouncer.phase() == DebouncePhase::AwaitingGate { ticket };
        if self.debouncer.gate_resolved(ticket, outcome).is_some() {
            return vec![self.issue_analysis()];
        }
        if current && outcome == GateOutcome::Cancelled {
            self.stats.gates_cancelled += 1;
            log::info!("sponsor gate cancelled, analysis aborted");
        }
        Vec::new()
    }

    fn issue_analysis(&mut self) -> Effect {
        let snapshot = self.selection.snapshot();
        let path = AnalyzeQuery::for_selection(self.kind, &snapshot).path(self.kind);
        let ticket = self.analyses.issue(snapshot);
        self.stats.requests_issued += 1;
        Effect::Analyze { ticket, path }
    }

    fn analysis_arrived(
        &mut self,
        ticket: &RequestTicket,
        result: Result<AnalysisResult, ApiError>,
    ) {
        let current = self.selection.snapshot();
        match self.analyses.settle(ticket, &current) {
            Err(Staleness::Superseded) => {
                self.stats.stale_discarded += 1;
                log::debug!("discarding superseded analysis #{}", ticket.seq);
                return;
            }
            Err(Staleness::SelectionChanged) => {
                self.stats.stale_discarded += 1;
                log::debug!("discarding analysis #{} for a changed selection", ticket.seq);
                return;
            }
            Ok(()) => {}
        }
        self.debouncer.settled();
        match result {
            Ok(result) => {
                self.result = Some(result);
                self.result_serial += 1;
                self.stats.results_applied += 1;
            }
            Err(err) => {
                self.stats.failures += 1;
                log::warn!("analysis #{} failed: {err}", ticket.seq);
            }
        }
    }

    fn grid_generated(
        &mut self,
        ticket: &RequestTicket,
        grid: Result<GeneratedGrid, ApiError>,
    ) -> Vec<Effect> {
        if !self.generations.is_latest(ticket) {
            log::debug!("discarding superseded generated grid #{}", ticket.seq);
            return Vec::new();
        }
        self.generations.invalidate();
        let grid = match grid {
            Ok(grid) => grid,
            Err(err) => {
                self.stats.failures += 1;
                log::warn!("grid generation failed: {err}");
                return Vec::new();
            }
        };
        self.stats.grids_generated += 1;
        self.reset();
        self.place_generated(Category::Primary, &grid.primary);
        self.place_generated(Category::Secondary, &grid.secondary);
        self.selection_changed(GatePolicy::Bypass)
    }

    fn place_generated(&mut self, category: Category, values: &[u8]) {
        for &n in values {
            let legal = self.selection.rules().accepts(category, n)
                && !self.selection.is_selected(category, n)
                && !self.selection.is_full(category);
            if legal {
                self.selection.toggle(category, n);
            } else {
                log::warn!("skipping illegal generated {category:?} number {n}");
            }
        }
    }
}
