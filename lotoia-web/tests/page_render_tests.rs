use futures::executor::block_on;
use lotoia_core::{GameKind, GateMode};
use lotoia_web::app::switch;
use lotoia_web::pages::simulator::Props as SimulatorProps;
use lotoia_web::pages::{Home, NotFound, SimulatorPage};
use lotoia_web::router::Route;
use yew::prelude::*;
use yew::LocalServerRenderer;

#[test]
fn home_links_both_simulators() {
    lotoia_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<Home>::new().render());
    assert!(html.contains("href=\"/loto\""), "{html}");
    assert!(html.contains("href=\"/euromillions\""));
    assert!(html.contains("Open the EuroMillions simulator"));
}

#[test]
fn not_found_links_home() {
    lotoia_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<NotFound>::new().render());
    assert!(html.contains("Page not found"), "{html}");
    assert!(html.contains("href=\"/\""));
}

#[test]
fn euromillions_page_renders_simulator_and_chat() {
    lotoia_web::i18n::set_lang("en");
    let props = SimulatorProps {
        kind: GameKind::EuroMillions,
        gate_mode: GateMode::Enabled,
    };
    let html = block_on(LocalServerRenderer::<SimulatorPage>::with_props(props).render());
    assert!(html.contains("EuroMillions simulator"), "{html}");
    assert_eq!(html.matches("data-number=").count(), 50 + 12);
    assert!(html.contains("Stars"));
    assert!(html.contains("chat-widget"));
    assert!(!html.contains("rating-banner"), "banner waits for the session delay");
}

#[test]
fn french_loto_page_is_translated() {
    lotoia_web::i18n::set_lang("fr");
    let props = SimulatorProps {
        kind: GameKind::Loto,
        gate_mode: GateMode::default(),
    };
    let html = block_on(LocalServerRenderer::<SimulatorPage>::with_props(props).render());
    assert!(html.contains("Simulateur Loto"), "{html}");
    assert!(html.contains("Numéro chance"));
    assert!(html.contains("Grille aléatoire"));
    lotoia_web::i18n::set_lang("en");
}

#[derive(Properties, PartialEq)]
struct RouteProps {
    route: Route,
}

#[function_component(Routed)]
fn routed(p: &RouteProps) -> Html {
    switch(p.route.clone())
}

#[test]
fn switch_maps_routes_to_pages() {
    lotoia_web::i18n::set_lang("en");
    let render = |route| block_on(LocalServerRenderer::<Routed>::with_props(RouteProps { route }).render());
    assert!(render(Route::Home).contains("game-cards"));
    assert!(render(Route::Loto).contains("simulator-loto"));
    assert!(render(Route::NotFound).contains("not-found"));
}
