use std::collections::BTreeMap;

use lotoia_core::rating::{MAX_RATING, MIN_RATING};
use lotoia_core::{GameKind, RatingPrompt, RatingRequest};
use yew::prelude::*;

use crate::i18n;
use crate::storage::{BrowserStore, session_id};
use crate::tasks::{sleep, spawn};

#[derive(Properties, PartialEq, Clone)]
pub struct StarsProps {
    pub on_rate: Callback<u8>,
    pub on_dismiss: Callback<()>,
}

/// The banner body: prompt, one button per star and a dismiss link.
#[function_component(RatingStars)]
pub fn rating_stars(p: &StarsProps) -> Html {
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <aside class="rating-banner" aria-labelledby="rating-prompt">
            <p id="rating-prompt">{ i18n::t("rating.prompt") }</p>
            <div class="rating-stars" role="group">
                { for (MIN_RATING..=MAX_RATING).map(|stars| {
                    let onclick = {
                        let cb = p.on_rate.clone();
                        Callback::from(move |_| cb.emit(stars))
                    };
                    let count = stars.to_string();
                    let label = i18n::tr("rating.star", Some(&BTreeMap::from([("count", count.as_str())])));
                    html! {
                        <button type="button" class="rating-star" data-rating={count.clone()} aria-label={label} {onclick}>
                            { "★" }
                        </button>
                    }
                }) }
            </div>
            <button type="button" class="rating-dismiss" onclick={dismiss}>{ i18n::t("rating.dismiss") }</button>
        </aside>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub kind: GameKind,
    /// Page path reported with the rating.
    pub page: AttrValue,
}

/// Rating banner of a simulator page, shown once the session is old enough
/// and hidden for good after a rating.
#[function_component(RatingBanner)]
pub fn rating_banner(p: &Props) -> Html {
    let visible = use_state(|| false);
    let prompt = RatingPrompt::for_simulator(p.kind);

    {
        let visible = visible.clone();
        let prompt = prompt.clone();
        use_effect_with(p.kind, move |_| {
            let now = crate::dom::now_ms();
            if let Some(delay) = prompt.remaining_delay(&BrowserStore::Local, &BrowserStore::Session, now) {
                spawn(async move {
                    sleep(u32::try_from(delay).unwrap_or(u32::MAX)).await;
                    visible.set(true);
                });
            }
            || ()
        });
    }

    if !*visible {
        return Html::default();
    }

    let on_dismiss = {
        let visible = visible.clone();
        Callback::from(move |()| visible.set(false))
    };
    let on_rate = {
        let visible = visible.clone();
        let page = p.page.to_string();
        Callback::from(move |stars: u8| {
            let request = RatingRequest::new(&prompt, stars, &session_id(), &page);
            prompt.mark_rated(&BrowserStore::Local);
            visible.set(false);
            spawn(async move {
                if let Err(err) = crate::api::post_rating(&request).await {
                    log::warn!("rating submission failed: {err}");
                }
            });
        })
    };
    html! { <RatingStars {on_rate} {on_dismiss} /> }
}
