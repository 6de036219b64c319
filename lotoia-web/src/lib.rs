#![forbid(unsafe_code)]
//! LotoIA browser front-end: Yew pages around the core grid simulator.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod components;
pub mod dom;
pub mod i18n;
pub mod pages;
pub mod paths;
pub mod router;
pub mod simulator;
pub mod storage;
pub mod tasks;
pub mod theme;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::init_logging();
    // Mirror the saved locale and theme on <html> before the first render
    i18n::set_lang(&i18n::current_lang());
    theme::apply_saved();
    yew::Renderer::<app::App>::new().render();
}
