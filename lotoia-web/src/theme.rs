//! Light/dark theme preference and the screen-reader status region.
use lotoia_core::constants::KEY_THEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label key of the button that switches *to* the other theme.
    #[must_use]
    pub const fn toggle_i18n_key(self) -> &'static str {
        match self {
            Self::Light => "theme.to_dark",
            Self::Dark => "theme.to_light",
        }
    }
}

/// Saved preference, light when nothing usable is stored.
#[must_use]
pub fn saved() -> Theme {
    crate::storage::get_pref(KEY_THEME)
        .and_then(|raw| Theme::parse(&raw))
        .unwrap_or_default()
}

/// Persist `theme` and reflect it as `data-theme` on `<html>`.
pub fn apply(theme: Theme) {
    crate::dom::set_root_attribute("data-theme", theme.as_str());
    crate::storage::set_pref(KEY_THEME, theme.as_str());
}

pub fn apply_saved() {
    crate::dom::set_root_attribute("data-theme", saved().as_str());
}

/// Id of the polite `aria-live` node rendered by the app shell.
pub const STATUS_NODE_ID: &str = "lotoia-status";

/// Announce `msg` to assistive technology, skipped when the node is absent.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(STATUS_NODE_ID))
    {
        node.set_text_content(Some(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_toggle() {
        assert_eq!(Theme::parse(" dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle_i18n_key(), "theme.to_light");
    }

    #[test]
    fn host_has_no_saved_theme() {
        assert_eq!(saved(), Theme::Light);
        apply(Theme::Dark);
        set_status("ignored off-browser");
    }
}
