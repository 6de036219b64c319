use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

fn label(result: &ScenarioResult) -> String {
    format!("{} [{} seed {}]", result.scenario_name, result.game, result.seed)
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulator Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==================================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total runs: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {}", status, label(result).bold())?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(
            out,
            "   Requests: {} issued, {} applied, {} stale, {} failed",
            result.totals.requests_issued,
            result.totals.results_applied,
            result.totals.stale_discarded,
            result.totals.failures
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            label(fastest).green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            label(slowest).yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# LotoIA Simulator Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {}", total_tests - passed_tests)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(out, "### {} {}\n", status, label(result))?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(
            out,
            "- **Requests**: {} issued, {} applied, {} stale",
            result.totals.requests_issued,
            result.totals.results_applied,
            result.totals.stale_discarded
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(
        out,
        "scenario,game,seed,passed,iterations,successes,requests_issued,results_applied,stale_discarded,failures,gates_opened,gates_cancelled,grids_generated,avg_ms"
    )?;
    for result in results {
        let t = result.totals;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            result.scenario_name,
            result.game.slug(),
            result.seed,
            result.passed,
            result.iterations_run,
            result.successful_iterations,
            t.requests_issued,
            t.results_applied,
            t.stale_discarded,
            t.failures,
            t.gates_opened,
            t.gates_cancelled,
            t.grids_generated,
            result.average_duration.as_millis()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotoia_core::{GameKind, SimulatorStats};

    fn sample(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "stale-response".into(),
            game: GameKind::EuroMillions,
            seed: 7,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (EuroMillions, seed 8): boom".into()]
            },
            totals: SimulatorStats {
                requests_issued: 4,
                results_applied: 2,
                stale_discarded: 2,
                ..SimulatorStats::default()
            },
            average_duration: Duration::from_millis(3),
            performance_data: vec![Duration::from_millis(3)],
        }
    }

    fn render(f: impl Fn(&mut dyn Write) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("report writes");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn csv_has_one_row_per_result() {
        let text = render(|out| generate_csv_report(out, &[sample(true), sample(false)]));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("scenario,game,seed"));
        assert_eq!(
            lines[1],
            "stale-response,euromillions,7,true,2,2,4,2,2,0,0,0,0,3"
        );
    }

    #[test]
    fn markdown_lists_failures() {
        let text = render(|out| generate_markdown_report(out, &[sample(false)]));
        assert!(text.contains("# LotoIA Simulator Test Results"));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("  - Iteration 2 (EuroMillions, seed 8): boom"));
    }

    #[test]
    fn console_report_handles_empty_runs() {
        let text = render(|out| generate_console_report(out, &[], Duration::ZERO));
        assert!(text.contains("Total runs: 0"));
        assert!(text.contains("Success rate: 0.0%"));
        assert!(!text.contains("Performance Summary"));
    }

    #[test]
    fn json_report_is_an_array() {
        let text = render(|out| generate_json_report(out, &[sample(true)]));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value[0]["totals"]["stale_discarded"], 2);
    }
}
