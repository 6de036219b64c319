use lotoia_core::SuggestionPanel;
use lotoia_core::presentation::{CriticalAlert, SuggestionView};
use yew::prelude::*;

use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct SuggestionProps {
    pub panel: SuggestionPanel,
}

fn alert_banner(alert: &CriticalAlert) -> Html {
    let message = alert
        .message
        .clone()
        .unwrap_or_else(|| i18n::t("suggestions.critical_default"));
    html! {
        <div class="critical-alert" role="alert">
            <span aria-hidden="true">{ "🚨" }</span>
            <strong>{ message }</strong>
        </div>
    }
}

fn item(view: &SuggestionView) -> Html {
    html! {
        <li class={classes!("suggestion", view.tone.css_class())}>
            <span class="suggestion-icon" aria-hidden="true">{ view.tone.icon() }</span>
            { view.text.clone() }
        </li>
    }
}

#[function_component(SuggestionList)]
pub fn suggestion_list(p: &SuggestionProps) -> Html {
    if p.panel.is_empty() {
        return Html::default();
    }
    html! {
        <div class="suggestions">
            <h3>{ i18n::t("suggestions.title") }</h3>
            { for p.panel.alert.iter().map(alert_banner) }
            <ul>{ for p.panel.items.iter().map(item) }</ul>
        </div>
    }
}
