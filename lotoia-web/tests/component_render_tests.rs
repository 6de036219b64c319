use chrono::NaiveDate;
use futures::executor::block_on;
use lotoia_core::{Category, DatabaseInfo, GameKind, HeatMap, SelectionState, grid_cells};
use lotoia_web::components::db_info::{Props as DbInfoProps, summary};
use lotoia_web::components::header::Props as HeaderProps;
use lotoia_web::components::rating_banner::StarsProps;
use lotoia_web::components::{ChatWidget, ConsentBanner, DbInfo, Footer, Header, RatingStars};
use lotoia_web::router::Route;
use lotoia_web::simulator::{GridProps, NumberGrid, SponsorGate, GateProps};
use lotoia_web::theme::Theme;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn info(total: u32) -> DatabaseInfo {
    DatabaseInfo {
        total_draws: total,
        first_draw: NaiveDate::from_ymd_opt(2008, 10, 6),
        last_draw: NaiveDate::from_ymd_opt(2025, 6, 14),
    }
}

#[test]
fn header_lists_locales_and_marks_active_route() {
    lotoia_web::i18n::set_lang("en");
    let props = HeaderProps {
        current_lang: "de".into(),
        on_lang_change: Callback::noop(),
        theme: Theme::Dark,
        on_theme_toggle: Callback::noop(),
        active: Some(Route::EuroMillions),
    };
    let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
    for name in ["Français", "English", "Español", "Deutsch"] {
        assert!(html.contains(name), "{name} missing: {html}");
    }
    assert!(html.contains("Light mode"), "dark theme offers light: {html}");
    assert!(html.contains("aria-current=\"page\""));
    assert!(html.contains("href=\"/euromillions\""));
}

#[test]
fn footer_carries_responsible_gaming_notice() {
    lotoia_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("play responsibly"), "{html}");
}

#[test]
fn consent_banner_shows_without_stored_decision() {
    lotoia_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<ConsentBanner>::new().render());
    assert!(html.contains("consent-accept"), "{html}");
    assert!(html.contains("Decline"));
}

#[test]
fn rating_stars_offer_one_to_five() {
    lotoia_web::i18n::set_lang("en");
    let props = StarsProps {
        on_rate: Callback::noop(),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<RatingStars>::with_props(props).render());
    assert_eq!(html.matches("rating-star\"").count(), 5, "{html}");
    assert!(html.contains("aria-label=\"1 star\""));
    assert!(html.contains("aria-label=\"5 stars\""));
}

#[test]
fn database_info_line_needs_a_draw_count() {
    lotoia_web::i18n::set_lang("en");
    assert_eq!(
        summary(&info(2421)).as_deref(),
        Some("Based on 2421 draws from 06/10/2008 to 14/06/2025")
    );
    assert_eq!(summary(&info(0)), None);

    let html = block_on(
        LocalServerRenderer::<DbInfo>::with_props(DbInfoProps { info: None }).render(),
    );
    assert!(!html.contains("db-info"));
}

#[test]
fn french_is_singular_for_one_draw() {
    lotoia_web::i18n::set_lang("fr");
    assert_eq!(
        summary(&info(1)).as_deref(),
        Some("Basé sur 1 tirage du 06/10/2008 au 14/06/2025")
    );
    lotoia_web::i18n::set_lang("en");
}

#[test]
fn chat_widget_starts_empty() {
    lotoia_web::i18n::set_lang("en");
    let html = block_on(
        LocalServerRenderer::<ChatWidget>::with_props(lotoia_web::components::chat_widget::Props {
            kind: GameKind::Loto,
        })
        .render(),
    );
    assert!(html.contains("No messages yet."), "{html}");
    assert!(html.contains("chat-input"));
}

#[test]
fn star_grid_uses_secondary_classes() {
    lotoia_web::i18n::set_lang("en");
    let selection = SelectionState::for_game(GameKind::EuroMillions);
    let props = GridProps {
        category: Category::Secondary,
        cells: grid_cells(&selection, Category::Secondary, &HeatMap::neutral()),
        label: AttrValue::from("Stars"),
        on_toggle: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NumberGrid>::with_props(props).render());
    assert_eq!(html.matches("secondary-number").count(), 12, "{html}");
    assert!(!html.contains("heat-"), "stars carry no heat: {html}");
    assert!(!html.contains("title="));
}

#[test]
fn sponsor_gate_exposes_cancel() {
    lotoia_web::i18n::set_lang("en");
    let props = GateProps {
        duration_ms: 3000,
        on_cancel: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SponsorGate>::with_props(props).render());
    assert!(html.contains("animation-duration:3000ms"), "{html}");
    assert!(html.contains("sponsor-cancel"));
}
