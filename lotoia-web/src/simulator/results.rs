use lotoia_core::{BadgeView, MetricView, ResultView};
use yew::prelude::*;

use super::history::HistoryBlock;
use super::suggestions::SuggestionList;
use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct ResultsProps {
    pub view: ResultView,
    /// Changes with every applied analysis so the entry transition replays.
    pub serial: u64,
}

fn badge(view: &BadgeView) -> Html {
    html! {
        <li class="badge">
            <span class="badge-icon" aria-hidden="true">{ view.icon }</span>
            <span class="badge-label">{ view.label.clone() }</span>
        </li>
    }
}

fn metric_row(metric: &MetricView) -> Html {
    let light = metric.light;
    html! {
        <tr class={classes!("metric", light.css_class())}>
            <th scope="row">{ i18n::t(metric.key.i18n_key()) }</th>
            <td class="metric-value">{ metric.value.display() }</td>
            <td>
                <span class={classes!("light", light.css_class())} role="img" aria-label={i18n::t(light.i18n_key())}></span>
            </td>
        </tr>
    }
}

#[function_component(ResultsPanel)]
pub fn results_panel(p: &ResultsProps) -> Html {
    let view = &p.view;
    let percent = i18n::fmt_pct(view.percent);
    html! {
        <section
            key={p.serial.to_string()}
            class={classes!("results", "result-enter")}
            aria-labelledby="results-title"
        >
            <h2 id="results-title">{ i18n::t("results.title") }</h2>
            <div class={classes!("convergence", view.tier.css_class())}>
                <div class="score-gauge" style={format!("--score:{}", view.percent)}>
                    <span class="score-value">{ percent }</span>
                </div>
                <p class="convergence-label">{ i18n::t(view.tier.i18n_key()) }</p>
            </div>
            if !view.comparison_text.is_empty() {
                <p class="comparison">{ view.comparison_text.clone() }</p>
            }
            if !view.badges.is_empty() {
                <ul class="badges" aria-label={i18n::t("results.badges")}>
                    { for view.badges.iter().map(badge) }
                </ul>
            }
            if !view.metrics.is_empty() {
                <table class="metrics">
                    <caption>{ i18n::t("results.details") }</caption>
                    <tbody>{ for view.metrics.iter().map(metric_row) }</tbody>
                </table>
            }
            <SuggestionList panel={view.suggestions.clone()} />
            <HistoryBlock lines={view.history.clone()} />
        </section>
    }
}
