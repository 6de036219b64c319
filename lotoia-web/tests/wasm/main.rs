#![cfg(target_arch = "wasm32")]

use lotoia_core::storage::{KeyValueStore, load_json, save_json};
use lotoia_core::{ConsentChoice, ConsentRecord};
use lotoia_web::app::App;
use lotoia_web::dom;
use lotoia_web::storage::BrowserStore;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use yew::Renderer;

wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document();
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn settle() {
    gloo::timers::future::TimeoutFuture::new(0).await;
}

#[wasm_bindgen_test]
fn local_storage_round_trips_json() {
    let store = BrowserStore::Local;
    assert!(save_json(&store, "lotoia.test", &vec![1, 2, 3]));
    assert_eq!(load_json::<Vec<i32>, _>(&store, "lotoia.test"), Some(vec![1, 2, 3]));
    store.remove("lotoia.test");
    assert_eq!(store.get_raw("lotoia.test"), Ok(None));
}

#[wasm_bindgen_test]
fn consent_record_persists_in_local_storage() {
    let now = dom::now_ms();
    ConsentRecord::decide(&BrowserStore::Local, ConsentChoice::Declined, now);
    let record = ConsentRecord::load_valid(&BrowserStore::Local, now).expect("stored record");
    assert!(!record.analytics_allowed());
    BrowserStore::Local.remove(lotoia_core::constants::KEY_CONSENT);
}

#[wasm_bindgen_test]
async fn clicking_numbers_marks_them_selected() {
    lotoia_web::i18n::set_lang("en");
    let history = dom::window().history().expect("history");
    history
        .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some("/loto"))
        .expect("navigate");
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;

    let doc = dom::document();
    let button: HtmlElement = doc
        .query_selector(".numbers-grid [data-number='7']")
        .expect("query")
        .expect("number 7 rendered")
        .dyn_into()
        .expect("button element");
    button.click();
    settle().await;
    assert!(button.class_list().contains("selected"));
    assert!(doc.get_element_by_id("lotoia-status").is_some());
}
