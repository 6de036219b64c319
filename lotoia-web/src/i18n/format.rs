#[cfg(target_arch = "wasm32")]
use crate::i18n::bundle::with_bundle;
use chrono::NaiveDate;
#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Intl, Object};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Format a number with the active locale's `Intl.NumberFormat`.
#[must_use]
pub fn fmt_number(num: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        with_bundle(|bundle| {
            let langs = js_sys::Array::of1(&JsValue::from_str(&bundle.lang));
            let nf = Intl::NumberFormat::new(&langs, &Object::new());
            let format_fn: Function = nf.format();
            format_fn
                .call1(&nf, &JsValue::from_f64(num))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| num.to_string())
        })
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        num.to_string()
    }
}

#[must_use]
pub fn fmt_pct(pct: u8) -> String {
    format!("{}%", fmt_number(f64::from(pct)))
}

/// Draw dates are shown day-first everywhere on the site.
#[must_use]
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
