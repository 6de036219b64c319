//! Traffic-light classification of detail metrics.
//!
//! Bands are static configuration (`assets/metric_bands.json`) so the
//! thresholds can be tuned per game without touching the renderer.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::analysis::{MetricKey, MetricValue};
use crate::game::GameKind;

const DEFAULT_BANDS_DATA: &str = include_str!("../../assets/metric_bands.json");

static BANDS: Lazy<MetricBands> = Lazy::new(MetricBands::load_from_static);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Light {
    Good,
    Warning,
    Bad,
}

impl Light {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Bad => "bad",
        }
    }

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Good => "light.good",
            Self::Warning => "light.warning",
            Self::Bad => "light.bad",
        }
    }
}

/// Inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Good band nested inside a wider warning band; anything else is bad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBand {
    pub good: Band,
    pub warning: Band,
}

impl MetricBand {
    #[must_use]
    pub const fn new(good: Band, warning: Band) -> Self {
        Self { good, warning }
    }

    #[must_use]
    pub fn classify(&self, value: f64) -> Light {
        if self.good.contains(value) {
            Light::Good
        } else if self.warning.contains(value) {
            Light::Warning
        } else {
            Light::Bad
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameBands {
    pub even_odd: MetricBand,
    pub low_high: MetricBand,
    pub sum: MetricBand,
    pub spread: MetricBand,
    pub consecutive_runs: MetricBand,
    pub compliance: MetricBand,
}

impl GameBands {
    /// Built-in bands used when the embedded configuration cannot be read.
    #[must_use]
    pub const fn builtin(kind: GameKind) -> Self {
        let count = MetricBand::new(Band::new(2.0, 3.0), Band::new(1.0, 4.0));
        let sum = match kind {
            GameKind::Loto => MetricBand::new(Band::new(100.0, 140.0), Band::new(85.0, 155.0)),
            GameKind::EuroMillions => {
                MetricBand::new(Band::new(105.0, 150.0), Band::new(90.0, 165.0))
            }
        };
        Self {
            even_odd: count,
            low_high: count,
            sum,
            spread: MetricBand::new(Band::new(25.0, 45.0), Band::new(15.0, 48.0)),
            consecutive_runs: MetricBand::new(Band::new(0.0, 1.0), Band::new(0.0, 2.0)),
            compliance: MetricBand::new(Band::new(70.0, 100.0), Band::new(50.0, 100.0)),
        }
    }

    #[must_use]
    pub const fn band(&self, key: MetricKey) -> &MetricBand {
        match key {
            MetricKey::EvenOdd => &self.even_odd,
            MetricKey::LowHigh => &self.low_high,
            MetricKey::Sum => &self.sum,
            MetricKey::Spread => &self.spread,
            MetricKey::ConsecutiveRuns => &self.consecutive_runs,
            MetricKey::Compliance => &self.compliance,
        }
    }
}

fn loto_builtin() -> GameBands {
    GameBands::builtin(GameKind::Loto)
}

fn euromillions_builtin() -> GameBands {
    GameBands::builtin(GameKind::EuroMillions)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBands {
    #[serde(default = "loto_builtin")]
    pub loto: GameBands,
    #[serde(default = "euromillions_builtin")]
    pub euromillions: GameBands,
}

impl Default for MetricBands {
    fn default() -> Self {
        Self {
            loto: loto_builtin(),
            euromillions: euromillions_builtin(),
        }
    }
}

impl MetricBands {
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_BANDS_DATA).unwrap_or_else(|err| {
            log::warn!("metric bands config unreadable, using built-in bands: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn default_config() -> &'static Self {
        &BANDS
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into band tables.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub const fn for_game(&self, kind: GameKind) -> &GameBands {
        match kind {
            GameKind::Loto => &self.loto,
            GameKind::EuroMillions => &self.euromillions,
        }
    }

    /// Ratios are judged on their left count (even numbers, low numbers).
    #[must_use]
    pub fn classify(&self, kind: GameKind, key: MetricKey, value: MetricValue) -> Light {
        self.for_game(kind).band(key).classify(value.gauge())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(left: u8) -> MetricValue {
        MetricValue::Ratio {
            left,
            right: 5 - left,
        }
    }

    #[test]
    fn embedded_config_matches_builtin_defaults() {
        assert_eq!(MetricBands::load_from_static(), MetricBands::default());
    }

    #[test]
    fn shared_config_is_loaded_once() {
        let first = MetricBands::default_config();
        assert!(std::ptr::eq(first, MetricBands::default_config()));
        assert_eq!(first, &MetricBands::load_from_static());
    }

    #[test]
    fn even_count_bands() {
        let bands = MetricBands::default();
        let classify = |left| bands.classify(GameKind::Loto, MetricKey::EvenOdd, ratio(left));
        assert_eq!(classify(2), Light::Good);
        assert_eq!(classify(3), Light::Good);
        assert_eq!(classify(1), Light::Warning);
        assert_eq!(classify(4), Light::Warning);
        assert_eq!(classify(0), Light::Bad);
        assert_eq!(classify(5), Light::Bad);
    }

    #[test]
    fn sum_bands_differ_by_game() {
        let bands = MetricBands::default();
        let sum = MetricValue::Number(102.0);
        assert_eq!(
            bands.classify(GameKind::Loto, MetricKey::Sum, sum),
            Light::Good
        );
        assert_eq!(
            bands.classify(GameKind::EuroMillions, MetricKey::Sum, sum),
            Light::Warning
        );
        assert_eq!(
            bands.classify(GameKind::EuroMillions, MetricKey::Sum, MetricValue::Number(40.0)),
            Light::Bad
        );
    }

    #[test]
    fn partial_config_falls_back_per_game() {
        let json = r#"{"loto": {
            "even_odd": {"good": {"min": 1, "max": 4}, "warning": {"min": 0, "max": 5}},
            "low_high": {"good": {"min": 2, "max": 3}, "warning": {"min": 1, "max": 4}},
            "sum": {"good": {"min": 90, "max": 160}, "warning": {"min": 80, "max": 170}},
            "spread": {"good": {"min": 25, "max": 45}, "warning": {"min": 15, "max": 47}},
            "consecutive_runs": {"good": {"min": 0, "max": 1}, "warning": {"min": 0, "max": 2}},
            "compliance": {"good": {"min": 70, "max": 100}, "warning": {"min": 50, "max": 100}}
        }}"#;
        let bands = MetricBands::from_json(json).unwrap();
        assert_eq!(
            bands.classify(GameKind::Loto, MetricKey::EvenOdd, ratio(1)),
            Light::Good
        );
        assert_eq!(bands.euromillions, GameBands::builtin(GameKind::EuroMillions));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(MetricBands::from_json("{\"loto\": 3}").is_err());
    }
}
