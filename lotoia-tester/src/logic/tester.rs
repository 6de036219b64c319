use colored::Colorize;
use lotoia_core::{GameKind, SimulatorStats};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::common::scenario::TestScenario;
use crate::common::{artifacts_dir, capture_artifacts};
use crate::logic::{FakeBackend, Harness, RunSummary};

/// Decorrelates the script's random picks from the backend's answers.
const SCRIPT_SEED_SALT: u64 = 0x5C21_7E57_0000_0001;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub game: GameKind,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    /// Simulator counters summed over every iteration.
    pub totals: SimulatorStats,
    #[serde(serialize_with = "duration_serde::serialize")]
    pub average_duration: Duration,
    #[serde(serialize_with = "duration_serde::serialize_all")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester {
    verbose: bool,
    artifacts_base: Option<String>,
}

impl LogicTester {
    pub const fn new(verbose: bool, artifacts_base: Option<String>) -> Self {
        Self {
            verbose,
            artifacts_base,
        }
    }

    /// Run `scenario` for every game and seed. Must be awaited inside a
    /// `LocalSet`.
    pub async fn run_scenario(
        &self,
        scenario: &TestScenario,
        games: &[GameKind],
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &game in games {
            for &seed in seeds {
                if self.verbose {
                    println!(
                        "🧪 Testing scenario: {} (game: {} seed: {})",
                        scenario.key.bright_white(),
                        game,
                        seed
                    );
                }
                results.push(
                    self.run_single_scenario(scenario, game, seed, iterations)
                        .await,
                );
            }
        }

        results
    }

    async fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        game: GameKind,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();
        let mut totals = SimulatorStats::default();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            let (summary, outcome) = run_iteration(scenario, game, iteration_seed).await;
            accumulate(&mut totals, summary.finished.stats);

            match outcome {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);

                    if self.verbose {
                        println!(
                            "  ✅ Iteration {}/{} passed ({duration:?}) virtual:{}ms requests:{} stale:{}",
                            i + 1,
                            iterations,
                            summary.finished.elapsed_ms,
                            summary.finished.stats.requests_issued,
                            summary.finished.stats.stale_discarded
                        );
                    }
                }
                Err(err) => {
                    let context = summarize_trace(&summary);
                    failures.push(format!(
                        "Iteration {} ({game}, seed {}): {err:#} | {context}",
                        i + 1,
                        summary.seed
                    ));
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                        println!("     ↳ {context}");
                    }
                    if let Some(base) = &self.artifacts_base {
                        let dir = artifacts_dir(base, scenario.key, game, summary.seed);
                        if let Err(io_err) = capture_artifacts(&dir, &summary, &err) {
                            log::warn!("could not write artifacts to {dir}: {io_err:#}");
                        }
                    }
                }
            }
        }

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.key.to_string(),
            game,
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            totals,
            average_duration: avg_duration,
            performance_data,
        }
    }
}

/// One scripted run on a fresh simulator and backend.
async fn run_iteration(
    scenario: &TestScenario,
    game: GameKind,
    seed: u64,
) -> (RunSummary, anyhow::Result<()>) {
    let backend = FakeBackend::new(game, seed, scenario.profile);
    let harness = Harness::new(game, scenario.gate_mode, backend);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ SCRIPT_SEED_SALT);
    let steps = (scenario.script)(game);

    match harness.run_script(&steps, seed, &mut rng).await {
        Ok(summary) => {
            let outcome = scenario.evaluate(&summary);
            (summary, outcome)
        }
        Err(err) => (harness.summary(seed), Err(err)),
    }
}

fn accumulate(totals: &mut SimulatorStats, stats: SimulatorStats) {
    totals.requests_issued += stats.requests_issued;
    totals.results_applied += stats.results_applied;
    totals.stale_discarded += stats.stale_discarded;
    totals.failures += stats.failures;
    totals.gates_opened += stats.gates_opened;
    totals.gates_cancelled += stats.gates_cancelled;
    totals.grids_generated += stats.grids_generated;
}

/// The last few trace events, newest first.
fn summarize_trace(summary: &RunSummary) -> String {
    if summary.trace.is_empty() {
        return "no events recorded".to_string();
    }

    summary
        .trace
        .iter()
        .rev()
        .take(4)
        .map(|entry| format!("{}ms {}", entry.at_ms, entry.event))
        .collect::<Vec<_>>()
        .join(" | ")
}

mod duration_serde {
    use serde::{Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn serialize_all<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::{catalog_scenarios, find_scenario};
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn every_catalog_scenario_passes_for_both_games() {
        LocalSet::new()
            .run_until(async {
                let tester = LogicTester::new(false, None);
                for scenario in catalog_scenarios() {
                    let results = tester
                        .run_scenario(&scenario, &GameKind::ALL, &[1337, 7], 3)
                        .await;
                    assert_eq!(results.len(), 4);
                    for result in results {
                        assert!(
                            result.passed,
                            "{} {} failed: {:?}",
                            result.scenario_name, result.game, result.failures
                        );
                        assert_eq!(result.successful_iterations, 3);
                    }
                }
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn runs_are_reproducible_per_seed() {
        LocalSet::new()
            .run_until(async {
                let scenario = find_scenario("toggle-bounds").expect("catalog entry");
                let tester = LogicTester::new(false, None);
                let first = tester
                    .run_scenario(&scenario, &[GameKind::Loto], &[42], 2)
                    .await;
                let second = tester
                    .run_scenario(&scenario, &[GameKind::Loto], &[42], 2)
                    .await;
                assert_eq!(first[0].totals, second[0].totals);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn failing_expectation_is_reported_with_context() {
        LocalSet::new()
            .run_until(async {
                let scenario = find_scenario("smoke")
                    .expect("catalog entry")
                    .with_expectation(|_| anyhow::bail!("forced failure"));
                let results = LogicTester::new(false, None)
                    .run_scenario(&scenario, &[GameKind::EuroMillions], &[1], 2)
                    .await;
                let result = &results[0];
                assert!(!result.passed);
                assert_eq!(result.successful_iterations, 0);
                assert_eq!(result.failures.len(), 2);
                assert!(result.failures[0].contains("forced failure"));
                assert!(result.failures[0].contains("seed 1"));
            })
            .await;
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let result = ScenarioResult {
            scenario_name: "smoke".into(),
            game: GameKind::Loto,
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            totals: SimulatorStats::default(),
            average_duration: Duration::from_millis(12),
            performance_data: vec![Duration::from_millis(12)],
        };
        let json = serde_json::to_value(&result).expect("serializes");
        assert_eq!(json["average_duration"], 12);
        assert_eq!(json["game"], "loto");
        assert_eq!(json["performance_data"][0], 12);
    }
}
