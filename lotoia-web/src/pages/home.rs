use lotoia_core::GameKind;
use yew::prelude::*;

use crate::i18n::t;
use crate::router::Route;

fn game_card(kind: GameKind, cta_key: &str) -> Html {
    html! {
        <article class={classes!("game-card", format!("game-card-{}", kind.slug()))}>
            <h2>{ t(kind.i18n_key()) }</h2>
            <a class="cta" href={Route::for_game(kind).href()}>{ t(cta_key) }</a>
        </article>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <section class="home" aria-labelledby="home-title">
            <h1 id="home-title">{ t("home.title") }</h1>
            <p class="tagline">{ t("app.tagline") }</p>
            <p>{ t("home.intro") }</p>
            <div class="game-cards">
                { game_card(GameKind::Loto, "home.loto_cta") }
                { game_card(GameKind::EuroMillions, "home.euromillions_cta") }
            </div>
        </section>
    }
}
