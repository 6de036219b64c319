use anyhow::{Result, ensure};
use lotoia_core::constants::{DEBOUNCE_MS, SPONSOR_GATE_MS};
use lotoia_core::{DebouncePhase, GameKind, GateMode};

use super::TestScenario;
use crate::logic::{BackendProfile, Observation, RunSummary, Step};

const DEBOUNCE: u64 = DEBOUNCE_MS as u64;
const GATE: u64 = SPONSOR_GATE_MS as u64;

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "smoke",
            "Page load, one complete grid, one gated analysis",
            smoke_script,
        )
        .with_gate(GateMode::Enabled)
        .with_expectation(smoke_expectation),
        TestScenario::new(
            "debounce-burst",
            "Rapid edits around a complete grid collapse into one request",
            debounce_burst_script,
        )
        .with_expectation(debounce_burst_expectation),
        TestScenario::new(
            "toggle-bounds",
            "Random clicking never overfills either half of the grid",
            toggle_bounds_script,
        ),
        TestScenario::new(
            "stale-response",
            "A slow answer for an edited grid is never shown",
            stale_response_script,
        )
        .with_profile(BackendProfile::SLUGGISH)
        .with_expectation(stale_response_expectation),
        TestScenario::new(
            "gate-cancel",
            "Cancelling the sponsor gate aborts; completing again reopens it",
            gate_cancel_script,
        )
        .with_gate(GateMode::Enabled)
        .with_expectation(gate_cancel_expectation),
        TestScenario::new(
            "auto-generate",
            "A generated grid is analyzed once without the sponsor gate",
            auto_generate_script,
        )
        .with_gate(GateMode::Enabled)
        .with_expectation(auto_generate_expectation),
        TestScenario::new(
            "reset",
            "Reset clears the grid and drops the in-flight analysis",
            reset_script,
        )
        .with_profile(BackendProfile::SLUGGISH)
        .with_expectation(reset_expectation),
        TestScenario::new(
            "flaky-backend",
            "Injected backend failures are absorbed and leave nothing pending",
            flaky_backend_script,
        )
        .with_profile(BackendProfile::FLAKY),
    ]
}

#[must_use]
pub fn find_scenario(key: &str) -> Option<TestScenario> {
    catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key)
}

/// Toggles for a fixed complete grid: 7 14 21 28 35 plus the lowest
/// secondary numbers (3, then 9 for EuroMillions).
fn fixed_grid(kind: GameKind) -> Vec<Step> {
    let mut steps: Vec<Step> = [7, 14, 21, 28, 35]
        .into_iter()
        .map(Step::TogglePrimary)
        .collect();
    let secondary: &[u8] = match kind {
        GameKind::Loto => &[3],
        GameKind::EuroMillions => &[3, 9],
    };
    steps.extend(secondary.iter().copied().map(Step::ToggleSecondary));
    steps
}

fn last_secondary(kind: GameKind) -> u8 {
    match kind {
        GameKind::Loto => 3,
        GameKind::EuroMillions => 9,
    }
}

fn smoke_script(_kind: GameKind) -> Vec<Step> {
    vec![
        Step::Mount,
        Step::PickComplete { gap_ms: 40 },
        Step::Wait(DEBOUNCE + 20),
        Step::Check("gate is showing", gate_open),
        Step::Settle,
    ]
}

fn smoke_expectation(summary: &RunSummary) -> Result<()> {
    let finished = &summary.finished;
    ensure!(finished.heat_loaded, "heat never loaded");
    ensure!(finished.database_info_loaded, "database info never loaded");
    ensure!(finished.complete, "grid should still be complete");
    ensure!(
        finished.stats.gates_opened == 1,
        "expected one gate, saw {}",
        finished.stats.gates_opened
    );
    ensure!(
        finished.result_serial == 1 && finished.score.is_some(),
        "expected one applied result, stats {:?}",
        finished.stats
    );
    Ok(())
}

fn gate_open(observation: &Observation) -> Result<()> {
    ensure!(
        matches!(observation.phase, DebouncePhase::AwaitingGate { .. }),
        "expected the sponsor gate, pipeline is {:?}",
        observation.phase
    );
    Ok(())
}

fn nothing_requested(observation: &Observation) -> Result<()> {
    ensure!(
        observation.stats.requests_issued == 0,
        "{} request(s) already issued",
        observation.stats.requests_issued
    );
    Ok(())
}

fn one_requested(observation: &Observation) -> Result<()> {
    ensure!(
        observation.stats.requests_issued == 1,
        "expected exactly one request, saw {}",
        observation.stats.requests_issued
    );
    Ok(())
}

fn debounce_burst_script(kind: GameKind) -> Vec<Step> {
    let mut steps = fixed_grid(kind);
    // Deselect inside the quiet window: the pending fire must die.
    steps.extend([
        Step::Wait(DEBOUNCE - 100),
        Step::TogglePrimary(35),
        Step::Wait(DEBOUNCE + 200),
        Step::Check("incomplete grid sends nothing", nothing_requested),
        Step::TogglePrimary(36),
    ]);
    let star = last_secondary(kind);
    for _ in 0..4 {
        steps.extend([
            Step::Wait(120),
            Step::ToggleSecondary(star),
            Step::Wait(120),
            Step::ToggleSecondary(star),
        ]);
    }
    steps.push(Step::Settle);
    steps
}

fn debounce_burst_expectation(summary: &RunSummary) -> Result<()> {
    ensure!(
        summary.analyze_paths.len() == 1,
        "expected one analyze request, saw {:?}",
        summary.analyze_paths
    );
    ensure!(
        summary.analyze_paths[0].contains("nums=7,14,21,28,36"),
        "request carried the wrong grid: {}",
        summary.analyze_paths[0]
    );
    Ok(())
}

fn toggle_bounds_script(_kind: GameKind) -> Vec<Step> {
    vec![
        Step::RandomToggles {
            count: 250,
            max_gap_ms: 2 * DEBOUNCE,
        },
        Step::Settle,
    ]
}

fn stale_response_script(kind: GameKind) -> Vec<Step> {
    let mut steps = fixed_grid(kind);
    let star = last_secondary(kind);
    steps.extend([
        Step::Wait(DEBOUNCE + 20),
        Step::Check("first request is out", one_requested),
        Step::ToggleSecondary(star),
        Step::ToggleSecondary(star + 1),
        Step::Settle,
    ]);
    steps
}

fn stale_response_expectation(summary: &RunSummary) -> Result<()> {
    let stats = summary.finished.stats;
    ensure!(stats.requests_issued == 2, "expected two requests, stats {stats:?}");
    ensure!(
        stats.stale_discarded == 1 && stats.results_applied == 1,
        "the first answer should be discarded, stats {stats:?}"
    );
    Ok(())
}

fn gate_cancel_script(kind: GameKind) -> Vec<Step> {
    let mut steps = fixed_grid(kind);
    steps.extend([
        Step::Wait(DEBOUNCE + 20),
        Step::Check("gate is showing", gate_open),
        Step::CancelGate,
        Step::Wait(GATE + 500),
        Step::Check("cancelled gate sends nothing", nothing_requested),
        Step::TogglePrimary(35),
        Step::TogglePrimary(36),
        Step::Wait(DEBOUNCE + 20),
        Step::Check("gate reopens for the new grid", gate_open),
        Step::Settle,
    ]);
    steps
}

fn gate_cancel_expectation(summary: &RunSummary) -> Result<()> {
    let stats = summary.finished.stats;
    ensure!(
        stats.gates_opened == 2 && stats.gates_cancelled == 1,
        "gate counts off: {stats:?}"
    );
    ensure!(
        stats.requests_issued == 1 && stats.results_applied == 1,
        "expected one analysis after the second gate, stats {stats:?}"
    );
    Ok(())
}

fn auto_generate_script(_kind: GameKind) -> Vec<Step> {
    vec![Step::TogglePrimary(1), Step::AutoGenerate, Step::Settle]
}

fn auto_generate_expectation(summary: &RunSummary) -> Result<()> {
    let stats = summary.finished.stats;
    ensure!(summary.generate_calls == 1, "expected one generate call");
    ensure!(stats.grids_generated == 1, "grid was not applied: {stats:?}");
    ensure!(stats.gates_opened == 0, "generated grids skip the gate");
    ensure!(
        stats.requests_issued == 1 && stats.results_applied == 1,
        "expected one analysis of the generated grid, stats {stats:?}"
    );
    ensure!(summary.finished.complete, "generated grid should be complete");
    Ok(())
}

fn reset_script(kind: GameKind) -> Vec<Step> {
    let mut steps = fixed_grid(kind);
    steps.extend([
        Step::Wait(DEBOUNCE + 20),
        Step::Check("request is in flight", one_requested),
        Step::Reset,
        Step::Check("grid is empty", empty_grid),
        Step::Settle,
    ]);
    steps
}

fn empty_grid(observation: &Observation) -> Result<()> {
    ensure!(
        observation.selection.primary.is_empty() && observation.selection.secondary.is_empty(),
        "selection survived reset: {:?}",
        observation.selection
    );
    ensure!(observation.score.is_none(), "result survived reset");
    ensure!(observation.phase.is_idle(), "pipeline survived reset");
    Ok(())
}

fn reset_expectation(summary: &RunSummary) -> Result<()> {
    let stats = summary.finished.stats;
    ensure!(
        stats.results_applied == 0 && stats.stale_discarded == 1,
        "in-flight answer should be dropped, stats {stats:?}"
    );
    ensure!(summary.finished.score.is_none(), "no result after reset");
    Ok(())
}

fn flaky_backend_script(_kind: GameKind) -> Vec<Step> {
    let mut steps = Vec::new();
    for _ in 0..6 {
        steps.extend([Step::PickComplete { gap_ms: 15 }, Step::Wait(DEBOUNCE + 400)]);
    }
    steps.push(Step::Settle);
    steps
}
