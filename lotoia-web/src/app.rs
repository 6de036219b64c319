use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{ConsentBanner, Footer, Header};
use crate::i18n;
use crate::pages::{Home, NotFound, SimulatorPage};
use crate::router::Route;
use crate::theme::{self, STATUS_NODE_ID};

/// Page body for a route.
#[must_use]
pub fn switch(route: Route) -> Html {
    match route.game() {
        Some(kind) => html! { <SimulatorPage {kind} /> },
        None if route == Route::Home => html! { <Home /> },
        None => html! { <NotFound /> },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <Shell />
        </BrowserRouter>
    }
}

/// Chrome around the routed page. Holds the locale and theme so that
/// switching either re-renders every translated string.
#[function_component(Shell)]
pub fn shell() -> Html {
    let lang = use_state(i18n::current_lang);
    let theme = use_state(theme::saved);
    let route = use_route::<Route>();

    let on_lang_change = {
        let lang = lang.clone();
        Callback::from(move |code: String| {
            i18n::set_lang(&code);
            lang.set(i18n::current_lang());
        })
    };
    let on_theme_toggle = {
        let theme = theme.clone();
        Callback::from(move |()| {
            let next = theme.toggled();
            theme::apply(next);
            theme.set(next);
        })
    };

    html! {
        <>
            <Header
                current_lang={(*lang).clone()}
                {on_lang_change}
                theme={*theme}
                {on_theme_toggle}
                active={route.clone()}
            />
            <main id="main" key={(*lang).clone()}>
                <Switch<Route> render={switch} />
            </main>
            <Footer />
            <ConsentBanner />
            <div id={STATUS_NODE_ID} class="sr-only" role="status" aria-live="polite"></div>
        </>
    }
}
