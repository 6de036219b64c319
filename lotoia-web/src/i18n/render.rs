use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Intl, Object};

type Args<'a> = BTreeMap<&'a str, &'a str>;

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, part| node.get(part))
}

/// CLDR plural category for `count`. French treats 0 and 1 as singular.
fn plural_category(lang: &str, count: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let langs = Array::of1(&wasm_bindgen::JsValue::from_str(lang));
        let rules = Intl::PluralRules::new(&langs, &Object::new());
        if let Some(category) = rules.select(count).as_string() {
            return category;
        }
    }
    let singular = if lang == "fr" {
        count.abs() < 2.0
    } else {
        (count - 1.0).abs() < f64::EPSILON
    };
    let category = if singular { "one" } else { "other" };
    category.to_string()
}

fn pick_template(value: &Value, lang: &str, args: Option<&Args<'_>>) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(forms) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<f64>().ok());
            count
                .and_then(|n| forms.get(&plural_category(lang, n)))
                .or_else(|| forms.get("other"))
                .and_then(Value::as_str)
                .map(str::to_string)
        }
        _ => None,
    }
}

fn interpolate(template: String, args: Option<&Args<'_>>) -> String {
    let Some(args) = args else {
        return template;
    };
    args.iter().fold(template, |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

fn resolve(key: &str, args: Option<&Args<'_>>) -> Option<String> {
    with_bundle(|bundle| {
        [&bundle.translations, &bundle.fallback]
            .into_iter()
            .find_map(|root| lookup(root, key).and_then(|v| pick_template(v, &bundle.lang, args)))
            .map(|template| interpolate(template, args))
    })
}

/// Translate `key` in the active locale, English as fallback, the key itself
/// as a last resort.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate with `{name}` placeholders. A `count` argument selects the plural
/// form when the entry is an object of `one`/`other` forms.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}
