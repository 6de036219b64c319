use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
}

/// The site is French first.
pub const DEFAULT_LANG: &str = "fr";
/// Bundle consulted for keys missing from the active locale.
pub const FALLBACK_LANG: &str = "en";

const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "fr",
        name: "Français",
    },
    LocaleMeta {
        code: "en",
        name: "English",
    },
    LocaleMeta {
        code: "es",
        name: "Español",
    },
    LocaleMeta {
        code: "de",
        name: "Deutsch",
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("fr", include_str!("../../i18n/fr.json")),
    ("en", include_str!("../../i18n/en.json")),
    ("es", include_str!("../../i18n/es.json")),
    ("de", include_str!("../../i18n/de.json")),
];

/// Supported locales with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

/// Parsed translations for `lang`, `None` for unknown codes or broken JSON.
pub fn load_translations(lang: &str) -> Option<Value> {
    let (_, data) = LOCALE_TABLE.iter().find(|(code, _)| *code == lang)?;
    serde_json::from_str(data)
        .map_err(|err| log::error!("translations for {lang} are malformed: {err}"))
        .ok()
}
