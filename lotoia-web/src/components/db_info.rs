use std::collections::BTreeMap;

use lotoia_core::DatabaseInfo;
use yew::prelude::*;

use crate::i18n;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub info: Option<DatabaseInfo>,
}

/// "Based on N draws from D1 to D2", or nothing when the count is unknown.
#[must_use]
pub fn summary(info: &DatabaseInfo) -> Option<String> {
    if !info.is_displayable() {
        return None;
    }
    let count = info.total_draws.to_string();
    let total = i18n::fmt_number(f64::from(info.total_draws));
    let date = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "?".to_string(), i18n::fmt_date);
    let first = date(info.first_draw);
    let last = date(info.last_draw);
    let args = BTreeMap::from([
        ("count", count.as_str()),
        ("total", total.as_str()),
        ("first", first.as_str()),
        ("last", last.as_str()),
    ]);
    Some(i18n::tr("db_info.summary", Some(&args)))
}

#[function_component(DbInfo)]
pub fn db_info(p: &Props) -> Html {
    p.info.as_ref().and_then(summary).map_or_else(Html::default, |text| {
        html! { <p class="db-info">{ text }</p> }
    })
}
