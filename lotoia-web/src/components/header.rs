use crate::i18n::{locales, t};
use crate::router::Route;
use crate::theme::Theme;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
    pub theme: Theme,
    pub on_theme_toggle: Callback<()>,
    #[prop_or_default]
    pub active: Option<Route>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                cb.emit(sel.value());
            }
        })
    };
    let toggle_theme = {
        let cb = p.on_theme_toggle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let nav_link = |route: Route, key: &str| {
        let current = (p.active.as_ref() == Some(&route)).then_some("page");
        html! { <a href={route.href()} aria-current={current}>{ t(key) }</a> }
    };
    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ t("nav.skip") }</a>
            <div class="header-content">
                <a class="brand" href={Route::Home.href()}>{ t("app.title") }</a>
                <nav aria-label={t("nav.main")} class="header-nav">
                    { nav_link(Route::Loto, "nav.loto") }
                    { nav_link(Route::EuroMillions, "nav.euromillions") }
                </nav>
                <div class="header-right">
                    <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                    <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                        { for locales().iter().map(|meta| html! {
                            <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                        }) }
                    </select>
                    <button id="theme-toggle" type="button" onclick={toggle_theme}>
                        { t(p.theme.toggle_i18n_key()) }
                    </button>
                </div>
            </div>
        </header>
    }
}
