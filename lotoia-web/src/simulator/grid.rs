use std::collections::BTreeMap;

use lotoia_core::{Category, NumberCell};
use yew::prelude::*;

use crate::i18n;

#[derive(Properties, Clone, PartialEq)]
pub struct GridProps {
    pub category: Category,
    pub cells: Vec<NumberCell>,
    /// Heading of the picker, already localized.
    pub label: AttrValue,
    pub on_toggle: Callback<u8>,
}

/// Tooltip of a primary number: draw frequency and last draw date.
#[must_use]
pub fn heat_tooltip(cell: &NumberCell) -> String {
    let frequency = cell.frequency.to_string();
    let last = cell
        .last_draw
        .map_or_else(|| i18n::t("heat.not_available"), i18n::fmt_date);
    let heat = i18n::t(cell.heat.i18n_key());
    let args = BTreeMap::from([
        ("heat", heat.as_str()),
        ("frequency", frequency.as_str()),
        ("last", last.as_str()),
    ]);
    i18n::tr("heat.tooltip", Some(&args))
}

#[function_component(NumberGrid)]
pub fn number_grid(p: &GridProps) -> Html {
    let grid_class = match p.category {
        Category::Primary => "numbers-grid",
        Category::Secondary => "secondary-grid",
    };
    html! {
        <fieldset class="picker">
            <legend>{ p.label.clone() }</legend>
            <div class={grid_class} role="group" aria-label={p.label.clone()}>
                { for p.cells.iter().map(|cell| {
                    let value = cell.value;
                    let onclick = {
                        let cb = p.on_toggle.clone();
                        Callback::from(move |_| cb.emit(value))
                    };
                    let title = cell.has_tooltip().then(|| heat_tooltip(cell));
                    html! {
                        <button
                            type="button"
                            key={value}
                            class={classes!(cell.class_list())}
                            data-number={value.to_string()}
                            aria-pressed={cell.selected.to_string()}
                            disabled={cell.disabled}
                            {title}
                            {onclick}
                        >
                            { value }
                        </button>
                    }
                }) }
            </div>
        </fieldset>
    }
}
