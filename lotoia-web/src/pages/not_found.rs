use yew::prelude::*;

use crate::i18n::t;
use crate::router::Route;

/// Shown for any path the router does not know.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ t("not_found.title") }</h1>
            <p>{ t("not_found.message") }</p>
            <a class="cta" href={Route::Home.href()}>{ t("not_found.back") }</a>
        </section>
    }
}
