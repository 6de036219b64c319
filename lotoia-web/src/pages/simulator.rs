use std::collections::BTreeMap;

use lotoia_core::{GameKind, GateMode};
use yew::prelude::*;

use crate::components::{ChatWidget, RatingBanner};
use crate::i18n;
use crate::router::Route;
use crate::simulator::SimulatorPanel;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub kind: GameKind,
    #[prop_or_default]
    pub gate_mode: GateMode,
}

#[function_component(SimulatorPage)]
pub fn simulator_page(p: &Props) -> Html {
    let game = i18n::t(p.kind.i18n_key());
    let title = i18n::tr(
        "simulator.title",
        Some(&BTreeMap::from([("game", game.as_str())])),
    );
    let page = AttrValue::from(Route::for_game(p.kind).href());
    html! {
        <section class="simulator-page" aria-labelledby="simulator-title">
            <h1 id="simulator-title">{ title }</h1>
            <SimulatorPanel kind={p.kind} gate_mode={p.gate_mode} />
            <ChatWidget kind={p.kind} />
            <RatingBanner kind={p.kind} {page} />
        </section>
    }
}
