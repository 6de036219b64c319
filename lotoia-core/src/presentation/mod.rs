//! Render-ready projection of simulator state.
//!
//! Everything here is pure: the web crate turns these views into markup and
//! the tester inspects them directly.

pub mod badges;
pub mod convergence;
pub mod grid;
pub mod history;
pub mod metrics;
pub mod suggestions;

use serde::Serialize;

use crate::analysis::{AnalysisResult, MetricKey, MetricValue};
use crate::game::GameKind;
use crate::numbers::score_percent;

pub use badges::{BadgeView, DEFAULT_BADGE_ICON, badge_kind};
pub use convergence::ConvergenceTier;
pub use grid::{NumberCell, grid_cells};
pub use history::{HistoryLine, history_lines};
pub use metrics::{Band, GameBands, Light, MetricBand, MetricBands};
pub use suggestions::{CriticalAlert, SuggestionPanel, SuggestionView, suggestion_tone};

/// Panel entry for the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricView {
    pub key: MetricKey,
    pub value: MetricValue,
    pub light: Light,
}

/// Everything the results panel shows for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub score: f64,
    pub percent: u8,
    pub tier: ConvergenceTier,
    pub comparison_text: String,
    pub badges: Vec<BadgeView>,
    pub metrics: Vec<MetricView>,
    pub suggestions: SuggestionPanel,
    pub history: Vec<HistoryLine>,
}

impl ResultView {
    #[must_use]
    pub fn build(kind: GameKind, result: &AnalysisResult, bands: &MetricBands) -> Self {
        let metrics = MetricKey::ALL
            .into_iter()
            .filter_map(|key| {
                result.metric(key).map(|value| MetricView {
                    key,
                    value,
                    light: bands.classify(kind, key, value),
                })
            })
            .collect();
        Self {
            score: result.score,
            percent: score_percent(result.score),
            tier: ConvergenceTier::from_score(result.score),
            comparison_text: result.comparison_text.clone(),
            badges: result.badges.iter().map(BadgeView::from_badge).collect(),
            metrics,
            suggestions: SuggestionPanel::from_result(result),
            history: result
                .history_check
                .as_ref()
                .map(history_lines)
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_view_orders_metrics_and_resolves_lights() {
        let json = r#"{
            "success": true,
            "score": 85,
            "badges": ["Grille équilibrée"],
            "details": {"conformite": 45, "pairs_impairs": "3/2", "somme": 160},
            "suggestions": [],
            "history_check": {"exact_match": false}
        }"#;
        let result = AnalysisResult::from_envelope(json).unwrap();
        let view = ResultView::build(GameKind::Loto, &result, &MetricBands::default());
        assert_eq!(view.tier, ConvergenceTier::Strong);
        assert_eq!(view.percent, 85);
        let keys: Vec<_> = view.metrics.iter().map(|m| (m.key, m.light)).collect();
        assert_eq!(
            keys,
            vec![
                (MetricKey::EvenOdd, Light::Good),
                (MetricKey::Sum, Light::Bad),
                (MetricKey::Compliance, Light::Bad),
            ]
        );
        assert_eq!(view.badges[0].icon, "⚖️");
        assert_eq!(view.history, vec![HistoryLine::NeverSeen]);
    }
}
