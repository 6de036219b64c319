mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{current_lang, set_lang};
pub use format::{fmt_date, fmt_number, fmt_pct};
pub use locales::{DEFAULT_LANG, FALLBACK_LANG, LocaleMeta, locales};
pub use render::{t, tr};
