//! Drives a [`Simulator`] the way the browser runner does: every effect
//! becomes a local task on the tokio clock and its completion re-enters as an
//! action. Must run inside a [`tokio::task::LocalSet`]; with a paused clock a
//! whole scenario completes in microseconds of wall time.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use lotoia_core::{
    Action, Category, DebouncePhase, Effect, GameKind, GateMode, GateOutcome, SelectionSnapshot,
    Simulator, SimulatorStats,
};
use rand::Rng;
use rand::seq::index::sample;
use rand_chacha::ChaCha8Rng;
use tokio::task::spawn_local;
use tokio::time::{Instant, sleep};

use super::backend::{FakeBackend, parse_analyze_path};

/// Long enough for any debounce, gate and backend round trip to finish.
pub const SETTLE_MS: u64 = 10_000;

/// Read-only view handed to scenario checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub elapsed_ms: u64,
    pub phase: DebouncePhase,
    pub stats: SimulatorStats,
    pub selection: SelectionSnapshot,
    pub complete: bool,
    pub score: Option<f64>,
    pub result_serial: u64,
    pub heat_loaded: bool,
    pub database_info_loaded: bool,
}

pub type Check = fn(&Observation) -> Result<()>;

/// One scripted user or clock interaction.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// The page-load fetches of heat and database info.
    Mount,
    TogglePrimary(u8),
    ToggleSecondary(u8),
    /// Toggle a random complete grid, starting from an empty selection.
    PickComplete { gap_ms: u64 },
    /// Random clicks over the whole board, including ones past capacity.
    RandomToggles { count: usize, max_gap_ms: u64 },
    Wait(u64),
    /// Wait for every pending timer, gate and response.
    Settle,
    /// Press the sponsor-gate cancel button, if the gate is showing.
    CancelGate,
    AutoGenerate,
    Reset,
    Check(&'static str, Check),
}

#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub at_ms: u64,
    pub event: String,
}

/// What one scripted run left behind.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub seed: u64,
    pub finished: Observation,
    pub analyze_paths: Vec<String>,
    /// Analyze responses delivered back to the simulator.
    pub analyses_answered: u32,
    pub generate_calls: u32,
    pub trace: Vec<TraceEntry>,
    pub violations: Vec<String>,
}

struct Inner {
    sim: RefCell<Simulator>,
    backend: FakeBackend,
    started: Instant,
    answered: Cell<u32>,
    trace: RefCell<Vec<TraceEntry>>,
    violations: RefCell<Vec<String>>,
}

#[derive(Clone)]
pub struct Harness {
    inner: Rc<Inner>,
}

impl Harness {
    #[must_use]
    pub fn new(kind: GameKind, gate_mode: GateMode, backend: FakeBackend) -> Self {
        Self {
            inner: Rc::new(Inner {
                sim: RefCell::new(Simulator::new(kind, gate_mode)),
                backend,
                started: Instant::now(),
                answered: Cell::new(0),
                trace: RefCell::new(Vec::new()),
                violations: RefCell::new(Vec::new()),
            }),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.inner.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn note(&self, event: String) {
        let at_ms = self.elapsed_ms();
        log::trace!("[{at_ms:>6}ms] {event}");
        self.inner.trace.borrow_mut().push(TraceEntry { at_ms, event });
    }

    fn violation(&self, message: String) {
        log::warn!("invariant violated: {message}");
        self.inner.violations.borrow_mut().push(message);
    }

    #[must_use]
    pub fn observe(&self) -> Observation {
        let sim = self.inner.sim.borrow();
        Observation {
            elapsed_ms: self.elapsed_ms(),
            phase: sim.phase(),
            stats: sim.stats(),
            selection: sim.selection().snapshot(),
            complete: sim.selection().is_complete(),
            score: sim.result().map(|r| r.score),
            result_serial: sim.result_serial(),
            heat_loaded: !sim.heat().is_empty(),
            database_info_loaded: sim.database_info().is_some(),
        }
    }

    /// Apply `action`, check the invariants that must hold after every step,
    /// then start the returned effects.
    pub fn dispatch(&self, action: Action) {
        let applied = match &action {
            Action::AnalysisArrived { ticket, .. } => Some(ticket.snapshot.clone()),
            _ => None,
        };
        let effects = {
            let mut sim = self.inner.sim.borrow_mut();
            let serial = sim.result_serial();
            let before = outcome_count(sim.stats());
            let effects = sim.apply(action);
            if let Some(snapshot) = applied {
                self.inner.answered.set(self.inner.answered.get() + 1);
                if sim.result_serial() != serial && snapshot != sim.selection().snapshot() {
                    self.violation(format!(
                        "result for {snapshot:?} applied to {:?}",
                        sim.selection().snapshot()
                    ));
                }
                let resolved = outcome_count(sim.stats()) - before;
                if resolved != 1 {
                    self.violation(format!("analysis response resolved {resolved} ways"));
                }
            }
            self.check_selection(&sim);
            effects
        };
        for effect in effects {
            self.run(effect);
        }
    }

    fn check_selection(&self, sim: &Simulator) {
        let selection = sim.selection();
        let rules = selection.rules();
        for category in [Category::Primary, Category::Secondary] {
            let count = selection.count(category);
            if count > rules.max(category) {
                self.violation(format!(
                    "{category:?} holds {count} numbers, max {}",
                    rules.max(category)
                ));
            }
        }
        let complete = selection.count(Category::Primary) == rules.primary_max
            && selection.count(Category::Secondary) == rules.secondary_max;
        if complete != selection.is_complete() {
            self.violation(format!(
                "is_complete() disagrees with counts for {:?}",
                selection.snapshot()
            ));
        }
        let waiting = matches!(
            sim.phase(),
            DebouncePhase::Scheduled { .. } | DebouncePhase::AwaitingGate { .. }
        );
        if waiting && !complete {
            self.violation(format!("{:?} with an incomplete grid", sim.phase()));
        }
    }

    fn run(&self, effect: Effect) {
        let harness = self.clone();
        match effect {
            Effect::ScheduleDebounce { ticket, delay_ms } => {
                self.note(format!("debounce #{} armed", ticket.value()));
                spawn_local(async move {
                    sleep(Duration::from_millis(u64::from(delay_ms))).await;
                    harness.dispatch(Action::DebounceElapsed(ticket));
                });
            }
            Effect::OpenGate {
                ticket,
                duration_ms,
            } => {
                self.note(format!("gate #{} opened", ticket.value()));
                spawn_local(async move {
                    sleep(Duration::from_millis(u64::from(duration_ms))).await;
                    harness.dispatch(Action::GateResolved {
                        ticket,
                        outcome: GateOutcome::Completed,
                    });
                });
            }
            Effect::Analyze { ticket, path } => {
                self.note(format!("analyze #{} {path}", ticket.seq));
                self.check_analyze_path(&path);
                let latency = self.inner.backend.latency();
                spawn_local(async move {
                    sleep(latency).await;
                    let result = harness.inner.backend.analyze(&path);
                    harness.note(format!(
                        "analysis #{} answered {}",
                        ticket.seq,
                        if result.is_ok() { "ok" } else { "error" }
                    ));
                    harness.dispatch(Action::AnalysisArrived { ticket, result });
                });
            }
            Effect::Generate { ticket, path } => {
                self.note(format!("generate #{} {path}", ticket.seq));
                let latency = self.inner.backend.latency();
                spawn_local(async move {
                    sleep(latency).await;
                    let grid = harness.inner.backend.generate();
                    harness.dispatch(Action::GridGenerated { ticket, grid });
                });
            }
        }
    }

    fn check_analyze_path(&self, path: &str) {
        let rules = self.inner.sim.borrow().selection().rules();
        match parse_analyze_path(path) {
            Some((primary, secondary))
                if primary.len() == rules.primary_max && secondary.len() == rules.secondary_max => {}
            _ => self.violation(format!("analyze request for an incomplete grid: {path}")),
        }
    }

    fn mount(&self) {
        let harness = self.clone();
        let latency = self.inner.backend.latency();
        spawn_local(async move {
            sleep(latency).await;
            harness.dispatch(Action::HeatLoaded(harness.inner.backend.heat()));
            harness.dispatch(Action::DatabaseInfoLoaded(
                harness.inner.backend.database_info(),
            ));
        });
    }

    fn cancel_gate(&self) {
        let phase = self.inner.sim.borrow().phase();
        let DebouncePhase::AwaitingGate { ticket } = phase else {
            self.note("cancel pressed without an open gate".to_string());
            return;
        };
        self.note(format!("gate #{} cancelled", ticket.value()));
        self.dispatch(Action::GateResolved {
            ticket,
            outcome: GateOutcome::Cancelled,
        });
    }

    async fn pick_complete(&self, rng: &mut ChaCha8Rng, gap_ms: u64) {
        self.dispatch(Action::Reset);
        let rules = self.inner.sim.borrow().selection().rules();
        let picks = [
            (Category::Primary, rules.primary_range, rules.primary_max),
            (Category::Secondary, rules.secondary_range, rules.secondary_max),
        ];
        for (category, range, amount) in picks {
            for index in sample(rng, usize::from(range), amount) {
                let Ok(n) = u8::try_from(index + 1) else {
                    continue;
                };
                self.dispatch(toggle(category, n));
                sleep(Duration::from_millis(gap_ms)).await;
            }
        }
    }

    async fn random_toggles(&self, rng: &mut ChaCha8Rng, count: usize, max_gap_ms: u64) {
        let rules = self.inner.sim.borrow().selection().rules();
        for _ in 0..count {
            let category = if rng.gen_bool(0.75) {
                Category::Primary
            } else {
                Category::Secondary
            };
            let n = rng.gen_range(1..=rules.range(category));
            self.dispatch(toggle(category, n));
            sleep(Duration::from_millis(rng.gen_range(0..=max_gap_ms))).await;
        }
    }

    /// Perform one step.
    ///
    /// # Errors
    ///
    /// Returns the failure of a [`Step::Check`].
    pub async fn perform(&self, step: Step, rng: &mut ChaCha8Rng) -> Result<()> {
        match step {
            Step::Mount => self.mount(),
            Step::TogglePrimary(n) => self.dispatch(Action::TogglePrimary(n)),
            Step::ToggleSecondary(n) => self.dispatch(Action::ToggleSecondary(n)),
            Step::PickComplete { gap_ms } => self.pick_complete(rng, gap_ms).await,
            Step::RandomToggles { count, max_gap_ms } => {
                self.random_toggles(rng, count, max_gap_ms).await;
            }
            Step::Wait(ms) => sleep(Duration::from_millis(ms)).await,
            Step::Settle => sleep(Duration::from_millis(SETTLE_MS)).await,
            Step::CancelGate => self.cancel_gate(),
            Step::AutoGenerate => self.dispatch(Action::AutoGenerate),
            Step::Reset => self.dispatch(Action::Reset),
            Step::Check(label, check) => {
                let observation = self.observe();
                check(&observation)
                    .with_context(|| format!("check '{label}' at {}ms", observation.elapsed_ms))?;
            }
        }
        Ok(())
    }

    /// Run `steps` in order, then settle and summarize.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, or the invariant violations recorded
    /// along the way.
    pub async fn run_script(
        &self,
        steps: &[Step],
        seed: u64,
        rng: &mut ChaCha8Rng,
    ) -> Result<RunSummary> {
        for (index, step) in steps.iter().enumerate() {
            self.perform(*step, rng)
                .await
                .with_context(|| format!("step {} ({step:?})", index + 1))?;
        }
        sleep(Duration::from_millis(SETTLE_MS)).await;

        let summary = self.summary(seed);
        if let Some(first) = summary.violations.first() {
            bail!(
                "{} invariant violation(s), first: {first}",
                summary.violations.len()
            );
        }
        Ok(summary)
    }

    #[must_use]
    pub fn summary(&self, seed: u64) -> RunSummary {
        let finished = self.observe();
        RunSummary {
            seed,
            finished,
            analyze_paths: self.inner.backend.analyze_paths(),
            analyses_answered: self.inner.answered.get(),
            generate_calls: self.inner.backend.generate_calls(),
            trace: self.inner.trace.borrow().clone(),
            violations: self.inner.violations.borrow().clone(),
        }
    }
}

/// Counters an analyze response can land in; each response bumps exactly one.
const fn outcome_count(stats: SimulatorStats) -> u32 {
    stats.results_applied + stats.stale_discarded + stats.failures
}

const fn toggle(category: Category, n: u8) -> Action {
    match category {
        Category::Primary => Action::TogglePrimary(n),
        Category::Secondary => Action::ToggleSecondary(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::backend::BackendProfile;
    use lotoia_core::constants::{DEBOUNCE_MS, SPONSOR_GATE_MS};
    use rand::SeedableRng;
    use tokio::task::LocalSet;

    fn harness(kind: GameKind, gate_mode: GateMode) -> Harness {
        Harness::new(kind, gate_mode, FakeBackend::new(kind, 11, BackendProfile::STEADY))
    }

    #[tokio::test(start_paused = true)]
    async fn one_request_after_the_quiet_period() {
        LocalSet::new()
            .run_until(async {
                let h = harness(GameKind::EuroMillions, GateMode::Disabled);
                for n in [7, 14, 21, 28, 35] {
                    h.dispatch(Action::TogglePrimary(n));
                }
                h.dispatch(Action::ToggleSecondary(3));
                h.dispatch(Action::ToggleSecondary(9));
                sleep(Duration::from_millis(u64::from(DEBOUNCE_MS) - 10)).await;
                assert_eq!(h.observe().stats.requests_issued, 0);
                sleep(Duration::from_millis(20)).await;
                assert_eq!(h.observe().stats.requests_issued, 1);
                sleep(Duration::from_millis(SETTLE_MS)).await;

                let summary = h.summary(11);
                assert_eq!(
                    summary.analyze_paths,
                    vec![
                        "/api/euromillions/analyze-custom-grid?nums=7,14,21,28,35&etoile1=3&etoile2=9"
                            .to_string()
                    ]
                );
                assert_eq!(summary.finished.result_serial, 1);
                assert!(summary.violations.is_empty());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn gate_holds_the_request_until_it_completes() {
        LocalSet::new()
            .run_until(async {
                let h = harness(GameKind::Loto, GateMode::Enabled);
                let mut rng = ChaCha8Rng::seed_from_u64(1);
                h.perform(Step::PickComplete { gap_ms: 10 }, &mut rng)
                    .await
                    .expect("pick");
                sleep(Duration::from_millis(u64::from(DEBOUNCE_MS) + 10)).await;
                assert!(matches!(h.observe().phase, DebouncePhase::AwaitingGate { .. }));
                sleep(Duration::from_millis(u64::from(SPONSOR_GATE_MS))).await;
                assert_eq!(h.observe().stats.requests_issued, 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_the_gate_sends_nothing() {
        LocalSet::new()
            .run_until(async {
                let h = harness(GameKind::Loto, GateMode::Enabled);
                let mut rng = ChaCha8Rng::seed_from_u64(2);
                let steps = [
                    Step::PickComplete { gap_ms: 10 },
                    Step::Wait(u64::from(DEBOUNCE_MS) + 50),
                    Step::CancelGate,
                ];
                let summary = h.run_script(&steps, 2, &mut rng).await.expect("runs");
                assert!(summary.analyze_paths.is_empty());
                assert_eq!(summary.finished.stats.gates_cancelled, 1);
                assert!(summary.finished.phase.is_idle());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn failing_check_names_its_step() {
        LocalSet::new()
            .run_until(async {
                let h = harness(GameKind::Loto, GateMode::Disabled);
                let mut rng = ChaCha8Rng::seed_from_u64(3);
                let steps = [Step::Check("never", |_| anyhow::bail!("nope"))];
                let err = h.run_script(&steps, 3, &mut rng).await.unwrap_err();
                let chain = format!("{err:#}");
                assert!(chain.contains("step 1"));
                assert!(chain.contains("check 'never'"));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn mount_loads_heat_and_database_info() {
        LocalSet::new()
            .run_until(async {
                let h = harness(GameKind::EuroMillions, GateMode::Disabled);
                let mut rng = ChaCha8Rng::seed_from_u64(4);
                let summary = h.run_script(&[Step::Mount], 4, &mut rng).await.expect("runs");
                assert!(summary.finished.heat_loaded);
                assert!(summary.finished.database_info_loaded);
            })
            .await;
    }
}
