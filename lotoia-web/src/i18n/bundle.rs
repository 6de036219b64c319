use crate::i18n::locales::{DEFAULT_LANG, FALLBACK_LANG, is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

pub(super) struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn empty() -> Value {
    Value::Object(serde_json::Map::new())
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    Some(I18nBundle {
        lang: lang.to_string(),
        translations: load_translations(lang)?,
        fallback: load_translations(FALLBACK_LANG).unwrap_or_else(empty),
    })
}

fn saved_lang() -> String {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        crate::storage::get_pref(lotoia_core::constants::KEY_LOCALE)
            .filter(|code| is_supported(code))
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new(
        build_bundle(&saved_lang()).unwrap_or_else(|| I18nBundle {
            lang: DEFAULT_LANG.to_string(),
            translations: load_translations(DEFAULT_LANG).unwrap_or_else(empty),
            fallback: empty(),
        }),
    );
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active locale.
///
/// Unknown codes are ignored. The choice is persisted and mirrored on
/// `<html lang>`.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("unsupported locale {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        crate::dom::set_root_attribute("lang", lang);
        crate::storage::set_pref(lotoia_core::constants::KEY_LOCALE, lang);
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
