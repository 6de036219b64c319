use anyhow::Result;
use lotoia_core::{GameKind, GateMode};

use crate::logic::{BackendProfile, RunSummary, Step};

pub mod catalog;

pub use catalog::{catalog_scenarios, find_scenario};

pub type Expectation = fn(&RunSummary) -> Result<()>;

/// A scripted interaction with one simulator page plus what must hold once
/// everything has settled.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub description: &'static str,
    pub gate_mode: GateMode,
    pub profile: BackendProfile,
    pub script: fn(GameKind) -> Vec<Step>,
    pub expectations: Vec<Expectation>,
}

impl TestScenario {
    #[must_use]
    pub fn new(
        key: &'static str,
        description: &'static str,
        script: fn(GameKind) -> Vec<Step>,
    ) -> Self {
        Self {
            key,
            description,
            gate_mode: GateMode::Disabled,
            profile: BackendProfile::STEADY,
            script,
            expectations: vec![settled_expectation, accounting_expectation],
        }
    }

    #[must_use]
    pub const fn with_gate(mut self, gate_mode: GateMode) -> Self {
        self.gate_mode = gate_mode;
        self
    }

    #[must_use]
    pub const fn with_profile(mut self, profile: BackendProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn with_expectation(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Check every expectation, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first failing expectation.
    pub fn evaluate(&self, summary: &RunSummary) -> Result<()> {
        self.expectations
            .iter()
            .try_for_each(|expectation| expectation(summary))
    }
}

/// Nothing may still be pending once the clock has run out.
fn settled_expectation(summary: &RunSummary) -> Result<()> {
    anyhow::ensure!(
        summary.finished.phase.is_idle(),
        "pipeline still {:?} after settling",
        summary.finished.phase
    );
    Ok(())
}

/// Every issued request reached the backend and was answered.
fn accounting_expectation(summary: &RunSummary) -> Result<()> {
    let stats = summary.finished.stats;
    anyhow::ensure!(
        stats.requests_issued == summary.analyses_answered,
        "{} requests issued but {} answered",
        stats.requests_issued,
        summary.analyses_answered
    );
    anyhow::ensure!(
        usize::try_from(stats.requests_issued).unwrap_or(usize::MAX)
            == summary.analyze_paths.len(),
        "{} requests issued but the backend saw {}",
        stats.requests_issued,
        summary.analyze_paths.len()
    );
    Ok(())
}

/// Keys accepted by `--scenarios`, with their descriptions.
#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}
