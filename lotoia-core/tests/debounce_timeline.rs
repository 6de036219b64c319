//! Drives the simulator against a virtual clock, firing timers in due order.
use lotoia_core::constants::DEBOUNCE_MS;
use lotoia_core::{
    Action, AnalysisResult, DebounceTicket, Effect, GameKind, GateMode, GateOutcome,
    RequestTicket, Simulator,
};

#[derive(Default)]
struct Clock {
    now: u32,
    timers: Vec<(u32, DebounceTicket)>,
    gates: Vec<DebounceTicket>,
    analyses: Vec<(u32, RequestTicket)>,
}

impl Clock {
    fn run(&mut self, sim: &mut Simulator, action: Action) {
        let effects = sim.apply(action);
        self.absorb(effects);
    }

    fn absorb(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce { ticket, delay_ms } => {
                    self.timers.push((self.now + delay_ms, ticket));
                }
                Effect::OpenGate { ticket, .. } => self.gates.push(ticket),
                Effect::Analyze { ticket, .. } => self.analyses.push((self.now, ticket)),
                Effect::Generate { .. } => {}
            }
        }
    }

    /// Advance time, firing every timer that comes due on the way.
    fn advance(&mut self, sim: &mut Simulator, ms: u32) {
        let until = self.now + ms;
        loop {
            self.timers.sort_by_key(|(due, _)| *due);
            match self.timers.first() {
                Some(&(due, ticket)) if due <= until => {
                    self.timers.remove(0);
                    self.now = due;
                    let effects = sim.apply(Action::DebounceElapsed(ticket));
                    self.absorb(effects);
                }
                _ => break,
            }
        }
        self.now = until;
    }
}

fn complete_euro(clock: &mut Clock, sim: &mut Simulator, gap_ms: u32) {
    for n in [7, 14, 21, 28, 35] {
        clock.run(sim, Action::TogglePrimary(n));
        clock.advance(sim, gap_ms);
    }
    clock.run(sim, Action::ToggleSecondary(3));
    clock.advance(sim, gap_ms);
    clock.run(sim, Action::ToggleSecondary(9));
}

#[test]
fn one_analysis_after_quiet_period() {
    let mut sim = Simulator::new(GameKind::EuroMillions, GateMode::Disabled);
    let mut clock = Clock::default();
    complete_euro(&mut clock, &mut sim, 50);
    let completed_at = clock.now;
    clock.advance(&mut sim, DEBOUNCE_MS - 1);
    assert!(clock.analyses.is_empty());
    clock.advance(&mut sim, 1);
    assert_eq!(clock.analyses.len(), 1);
    assert_eq!(clock.analyses[0].0, completed_at + DEBOUNCE_MS);
    clock.advance(&mut sim, 5_000);
    assert_eq!(clock.analyses.len(), 1);
}

#[test]
fn sixth_toggle_within_window_cancels_fire() {
    let mut sim = Simulator::new(GameKind::EuroMillions, GateMode::Disabled);
    let mut clock = Clock::default();
    complete_euro(&mut clock, &mut sim, 10);
    clock.advance(&mut sim, 200);
    clock.run(&mut sim, Action::TogglePrimary(35));
    clock.advance(&mut sim, 5_000);
    assert!(clock.analyses.is_empty());
}

#[test]
fn rapid_retoggles_collapse_into_one_request() {
    let mut sim = Simulator::new(GameKind::EuroMillions, GateMode::Disabled);
    let mut clock = Clock::default();
    complete_euro(&mut clock, &mut sim, 10);
    for _ in 0..4 {
        clock.advance(&mut sim, 120);
        clock.run(&mut sim, Action::ToggleSecondary(9));
        clock.advance(&mut sim, 120);
        clock.run(&mut sim, Action::ToggleSecondary(9));
    }
    clock.advance(&mut sim, DEBOUNCE_MS);
    assert_eq!(clock.analyses.len(), 1);
    assert_eq!(sim.stats().requests_issued, 1);
}

#[test]
fn late_response_for_old_grid_never_lands() {
    let mut sim = Simulator::new(GameKind::EuroMillions, GateMode::Disabled);
    let mut clock = Clock::default();
    complete_euro(&mut clock, &mut sim, 10);
    clock.advance(&mut sim, DEBOUNCE_MS);
    let (_, first) = clock.analyses[0].clone();

    clock.run(&mut sim, Action::ToggleSecondary(9));
    clock.run(&mut sim, Action::ToggleSecondary(11));
    clock.advance(&mut sim, DEBOUNCE_MS);
    let (_, second) = clock.analyses[1].clone();

    let fresh = AnalysisResult {
        score: 61.0,
        ..AnalysisResult::default()
    };
    sim.apply(Action::AnalysisArrived {
        ticket: second,
        result: Ok(fresh),
    });
    sim.apply(Action::AnalysisArrived {
        ticket: first,
        result: Ok(AnalysisResult {
            score: 99.0,
            ..AnalysisResult::default()
        }),
    });
    assert!((sim.result().unwrap().score - 61.0).abs() < f64::EPSILON);
    assert_eq!(sim.stats().stale_discarded, 1);
}

#[test]
fn gate_cancel_then_recomplete_reopens_gate() {
    let mut sim = Simulator::new(GameKind::EuroMillions, GateMode::Enabled);
    let mut clock = Clock::default();
    complete_euro(&mut clock, &mut sim, 10);
    clock.advance(&mut sim, DEBOUNCE_MS);
    assert_eq!(clock.gates.len(), 1);
    let gate = clock.gates[0];
    clock.run(
        &mut sim,
        Action::GateResolved {
            ticket: gate,
            outcome: GateOutcome::Cancelled,
        },
    );
    clock.advance(&mut sim, 5_000);
    assert!(clock.analyses.is_empty());

    clock.run(&mut sim, Action::TogglePrimary(35));
    clock.run(&mut sim, Action::TogglePrimary(36));
    clock.advance(&mut sim, DEBOUNCE_MS);
    assert_eq!(clock.gates.len(), 2);
    let gate = clock.gates[1];
    clock.run(
        &mut sim,
        Action::GateResolved {
            ticket: gate,
            outcome: GateOutcome::Completed,
        },
    );
    assert_eq!(clock.analyses.len(), 1);
    assert_eq!(
        clock.analyses[0].1.snapshot.primary,
        vec![7, 14, 21, 28, 36]
    );
}
