use std::collections::BTreeMap;

use lotoia_core::HistoryLine;
use yew::prelude::*;

use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct HistoryProps {
    pub lines: Vec<HistoryLine>,
}

/// Localized text of one history line.
#[must_use]
pub fn history_text(line: &HistoryLine) -> String {
    match line {
        HistoryLine::ExactRepeat { count, dates } => {
            let count = count.to_string();
            let dates = dates
                .iter()
                .map(|d| i18n::fmt_date(*d))
                .collect::<Vec<_>>()
                .join(", ");
            let args = BTreeMap::from([("count", count.as_str()), ("dates", dates.as_str())]);
            i18n::tr(line.i18n_key(), Some(&args))
        }
        HistoryLine::NeverSeen => i18n::t(line.i18n_key()),
        HistoryLine::BestMatch { count, date } => {
            let count = count.to_string();
            let date = date.map_or_else(|| i18n::t("heat.not_available"), i18n::fmt_date);
            let args = BTreeMap::from([("count", count.as_str()), ("date", date.as_str())]);
            i18n::tr(line.i18n_key(), Some(&args))
        }
    }
}

#[function_component(HistoryBlock)]
pub fn history_block(p: &HistoryProps) -> Html {
    if p.lines.is_empty() {
        return Html::default();
    }
    html! {
        <div class="history-check">
            <h3>{ i18n::t("history.title") }</h3>
            { for p.lines.iter().map(|line| {
                let class = match line {
                    HistoryLine::ExactRepeat { .. } => "history-exact",
                    HistoryLine::NeverSeen => "history-never",
                    HistoryLine::BestMatch { .. } => "history-best",
                };
                html! { <p class={class}>{ history_text(line) }</p> }
            }) }
        </div>
    }
}
