use lotoia_core::{ConsentChoice, ConsentRecord};
use yew::prelude::*;

use crate::i18n::t;
use crate::storage::BrowserStore;

/// Shown until an unexpired consent decision is stored.
#[function_component(ConsentBanner)]
pub fn consent_banner() -> Html {
    let open =
        use_state(|| ConsentRecord::load_valid(&BrowserStore::Local, crate::dom::now_ms()).is_none());
    if !*open {
        return Html::default();
    }
    let decide = |choice: ConsentChoice| {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| {
            ConsentRecord::decide(&BrowserStore::Local, choice, crate::dom::now_ms());
            open.set(false);
        })
    };
    html! {
        <div class="consent-banner" role="region" aria-label={t("consent.message")}>
            <p>{ t("consent.message") }</p>
            <div class="consent-actions">
                <button type="button" class="consent-decline" onclick={decide(ConsentChoice::Declined)}>
                    { t("consent.decline") }
                </button>
                <button type="button" class="consent-accept" onclick={decide(ConsentChoice::Accepted)}>
                    { t("consent.accept") }
                </button>
            </div>
        </div>
    }
}
