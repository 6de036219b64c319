//! Analysis result model and its mapping from the analyze-grid envelope.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::{ApiError, lenient_date, lenient_dates, null_default, parse_envelope};
use crate::numbers::clamp_score;

/// Escalating alert level attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Severity {
    #[default]
    None,
    Low,
    Elevated,
    Critical,
}

impl From<u8> for Severity {
    fn from(level: u8) -> Self {
        match level {
            0 => Self::None,
            1 => Self::Low,
            2 => Self::Elevated,
            _ => Self::Critical,
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::None => 0,
            Severity::Low => 1,
            Severity::Elevated => 2,
            Severity::Critical => 3,
        }
    }
}

/// Detail metrics reported for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetricKey {
    EvenOdd,
    LowHigh,
    Sum,
    Spread,
    ConsecutiveRuns,
    Compliance,
}

impl MetricKey {
    pub const ALL: [Self; 6] = [
        Self::EvenOdd,
        Self::LowHigh,
        Self::Sum,
        Self::Spread,
        Self::ConsecutiveRuns,
        Self::Compliance,
    ];

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::EvenOdd => "metric.even_odd",
            Self::LowHigh => "metric.low_high",
            Self::Sum => "metric.sum",
            Self::Spread => "metric.spread",
            Self::ConsecutiveRuns => "metric.consecutive",
            Self::Compliance => "metric.compliance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    /// `left/right` split, e.g. three even and two odd numbers.
    Ratio { left: u8, right: u8 },
    Number(f64),
}

impl MetricValue {
    /// Value fed to the traffic-light bands: the left count for ratios.
    #[must_use]
    pub fn gauge(self) -> f64 {
        match self {
            Self::Ratio { left, .. } => f64::from(left),
            Self::Number(n) => n,
        }
    }

    #[must_use]
    pub fn display(self) -> String {
        match self {
            Self::Ratio { left, right } => format!("{left}/{right}"),
            Self::Number(n) if n.fract().abs() < f64::EPSILON => format!("{n:.0}"),
            Self::Number(n) => format!("{n:.1}"),
        }
    }
}

/// Explicit badge tag emitted by newer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Hot,
    Cold,
    Balanced,
    Spread,
    Original,
    Sequence,
    Sum,
    Pattern,
    Warning,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    #[serde(default)]
    pub tag: Option<BadgeKind>,
}

/// Explicit suggestion tone emitted by newer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionTone {
    Critical,
    Warning,
    Tip,
    Positive,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(default)]
    pub tone: Option<SuggestionTone>,
}

/// Whether the grid was already drawn, and its closest historical match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryCheck {
    #[serde(default, alias = "exactMatch")]
    pub exact_match: Option<bool>,
    #[serde(default, alias = "exactDates", deserialize_with = "lenient_dates")]
    pub exact_dates: Vec<NaiveDate>,
    #[serde(default, alias = "bestMatchCount", deserialize_with = "null_default")]
    pub best_match_count: u8,
    #[serde(default, alias = "bestMatchDate", deserialize_with = "lenient_date")]
    pub best_match_date: Option<NaiveDate>,
}

impl HistoryCheck {
    /// Number of past draws identical to the grid.
    #[must_use]
    pub fn exact_count(&self) -> usize {
        self.exact_dates.len().max(1)
    }
}

/// Render-ready outcome of one analyze-grid call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub comparison_text: String,
    pub badges: Vec<Badge>,
    pub details: BTreeMap<MetricKey, MetricValue>,
    pub suggestions: Vec<Suggestion>,
    pub severity: Severity,
    pub alert_message: Option<String>,
    pub history_check: Option<HistoryCheck>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireBadge {
    Label(String),
    Tagged(Badge),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireSuggestion {
    Text(String),
    Toned(Suggestion),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireRatio {
    Text(String),
    Pair([u8; 2]),
}

impl WireRatio {
    fn into_value(self) -> Option<MetricValue> {
        let (left, right) = match self {
            Self::Pair([left, right]) => (left, right),
            Self::Text(text) => {
                let (l, r) = text.split_once('/')?;
                (l.trim().parse().ok()?, r.trim().parse().ok()?)
            }
        };
        Some(MetricValue::Ratio { left, right })
    }
}

#[derive(Deserialize, Default)]
struct WireDetails {
    #[serde(default, alias = "pairs_impairs", alias = "even_odd_ratio")]
    even_odd: Option<WireRatio>,
    #[serde(default, alias = "bas_haut", alias = "low_high_ratio")]
    low_high: Option<WireRatio>,
    #[serde(default, alias = "somme")]
    sum: Option<f64>,
    #[serde(default, alias = "dispersion", alias = "ecart")]
    spread: Option<f64>,
    #[serde(default, alias = "suites", alias = "suites_consecutives", alias = "consecutive")]
    consecutive_runs: Option<f64>,
    #[serde(default, alias = "conformite", alias = "score_conformite", alias = "compliance_score")]
    compliance: Option<f64>,
}

impl WireDetails {
    fn into_map(self) -> BTreeMap<MetricKey, MetricValue> {
        let mut map = BTreeMap::new();
        let ratios = [
            (MetricKey::EvenOdd, self.even_odd),
            (MetricKey::LowHigh, self.low_high),
        ];
        for (key, ratio) in ratios {
            if let Some(value) = ratio.and_then(WireRatio::into_value) {
                map.insert(key, value);
            }
        }
        let numbers = [
            (MetricKey::Sum, self.sum),
            (MetricKey::Spread, self.spread),
            (MetricKey::ConsecutiveRuns, self.consecutive_runs),
            (MetricKey::Compliance, self.compliance),
        ];
        for (key, number) in numbers {
            if let Some(n) = number.filter(|n| n.is_finite()) {
                map.insert(key, MetricValue::Number(n));
            }
        }
        map
    }
}

#[derive(Deserialize)]
struct WireResult {
    #[serde(default, deserialize_with = "null_default")]
    score: f64,
    #[serde(
        default,
        alias = "comparaison",
        alias = "comparison",
        deserialize_with = "null_default"
    )]
    comparison_text: String,
    #[serde(default, deserialize_with = "null_default")]
    badges: Vec<WireBadge>,
    #[serde(default, deserialize_with = "null_default")]
    details: WireDetails,
    #[serde(default, deserialize_with = "null_default")]
    suggestions: Vec<WireSuggestion>,
    #[serde(default, deserialize_with = "null_default")]
    severity: Severity,
    #[serde(default)]
    alert_message: Option<String>,
    #[serde(default, alias = "historyCheck")]
    history_check: Option<HistoryCheck>,
}

impl From<WireResult> for AnalysisResult {
    fn from(wire: WireResult) -> Self {
        Self {
            score: clamp_score(wire.score),
            comparison_text: wire.comparison_text,
            badges: wire
                .badges
                .into_iter()
                .map(|badge| match badge {
                    WireBadge::Label(label) => Badge { label, tag: None },
                    WireBadge::Tagged(badge) => badge,
                })
                .collect(),
            details: wire.details.into_map(),
            suggestions: wire
                .suggestions
                .into_iter()
                .map(|s| match s {
                    WireSuggestion::Text(text) => Suggestion { text, tone: None },
                    WireSuggestion::Toned(s) => s,
                })
                .collect(),
            severity: wire.severity,
            alert_message: wire.alert_message.filter(|m| !m.trim().is_empty()),
            history_check: wire.history_check,
        }
    }
}

impl AnalysisResult {
    /// Map an analyze-grid envelope into a result.
    ///
    /// # Errors
    ///
    /// Returns the envelope errors of [`parse_envelope`].
    pub fn from_envelope(text: &str) -> Result<Self, ApiError> {
        parse_envelope::<WireResult>(text).map(Self::from)
    }

    #[must_use]
    pub fn metric(&self, key: MetricKey) -> Option<MetricValue> {
        self.details.get(&key).copied()
    }
}
