//! Convergence label derived from the analysis score.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceTier {
    Strong,
    Moderate,
    Intermediate,
    Partial,
}

impl ConvergenceTier {
    /// Tier for a score in `[0, 100]`; lower bounds are inclusive.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Strong
        } else if score >= 60.0 {
            Self::Moderate
        } else if score >= 40.0 {
            Self::Intermediate
        } else {
            Self::Partial
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Strong => "convergence-strong",
            Self::Moderate => "convergence-moderate",
            Self::Intermediate => "convergence-intermediate",
            Self::Partial => "convergence-partial",
        }
    }

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Strong => "convergence.strong",
            Self::Moderate => "convergence.moderate",
            Self::Intermediate => "convergence.intermediate",
            Self::Partial => "convergence.partial",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_score_thresholds() {
        assert_eq!(ConvergenceTier::from_score(85.0), ConvergenceTier::Strong);
        assert_eq!(ConvergenceTier::from_score(80.0), ConvergenceTier::Strong);
        assert_eq!(ConvergenceTier::from_score(79.9), ConvergenceTier::Moderate);
        assert_eq!(ConvergenceTier::from_score(55.0), ConvergenceTier::Intermediate);
        assert_eq!(ConvergenceTier::from_score(40.0), ConvergenceTier::Intermediate);
        assert_eq!(ConvergenceTier::from_score(10.0), ConvergenceTier::Partial);
    }

    #[test]
    fn each_tier_has_its_own_class() {
        let classes = [
            ConvergenceTier::Strong,
            ConvergenceTier::Moderate,
            ConvergenceTier::Intermediate,
            ConvergenceTier::Partial,
        ]
        .map(ConvergenceTier::css_class);
        for (i, a) in classes.iter().enumerate() {
            for b in &classes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
