//! Number-picker projection of the selection and heat data.
use chrono::NaiveDate;
use serde::Serialize;

use crate::game::Category;
use crate::heat::{HeatCategory, HeatMap};
use crate::selection::SelectionState;

/// One clickable number control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberCell {
    pub category: Category,
    pub value: u8,
    pub selected: bool,
    pub disabled: bool,
    pub heat: HeatCategory,
    pub frequency: u32,
    pub last_draw: Option<NaiveDate>,
}

impl NumberCell {
    #[must_use]
    pub fn class_list(&self) -> Vec<&'static str> {
        let mut classes = vec![match self.category {
            Category::Primary => "number",
            Category::Secondary => "secondary-number",
        }];
        if self.category == Category::Primary {
            classes.push(self.heat.css_class());
        }
        if self.selected {
            classes.push("selected");
        }
        if self.disabled {
            classes.push("disabled");
        }
        classes
    }

    /// Heat only decorates primary numbers.
    #[must_use]
    pub fn has_tooltip(&self) -> bool {
        self.category == Category::Primary
    }
}

/// Cells of one category in display order. Secondary cells are always neutral.
#[must_use]
pub fn grid_cells(selection: &SelectionState, category: Category, heat: &HeatMap) -> Vec<NumberCell> {
    selection
        .rules()
        .values(category)
        .map(|value| {
            let info = match category {
                Category::Primary => heat.info(value),
                Category::Secondary => Default::default(),
            };
            NumberCell {
                category,
                value,
                selected: selection.is_selected(category, value),
                disabled: selection.is_disabled(category, value),
                heat: info.category,
                frequency: info.frequency,
                last_draw: info.last_draw_date,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameKind;
    use crate::heat::HeatInfo;
    use std::collections::BTreeMap;

    #[test]
    fn full_category_disables_only_unselected_cells() {
        let mut sel = SelectionState::for_game(GameKind::EuroMillions);
        sel.toggle_secondary(3);
        sel.toggle_secondary(9);
        let cells = grid_cells(&sel, Category::Secondary, &HeatMap::neutral());
        assert_eq!(cells.len(), 12);
        for cell in &cells {
            let chosen = cell.value == 3 || cell.value == 9;
            assert_eq!(cell.selected, chosen);
            assert_eq!(cell.disabled, !chosen);
        }
        let primary = grid_cells(&sel, Category::Primary, &HeatMap::neutral());
        assert!(primary.iter().all(|c| !c.disabled && !c.selected));
    }

    #[test]
    fn primary_cells_carry_heat() {
        let mut entries = BTreeMap::new();
        entries.insert(
            7,
            HeatInfo {
                category: HeatCategory::Hot,
                frequency: 301,
                last_draw_date: NaiveDate::from_ymd_opt(2025, 5, 3),
            },
        );
        let heat = HeatMap::new(entries, 2400);
        let sel = SelectionState::for_game(GameKind::Loto);
        let cells = grid_cells(&sel, Category::Primary, &heat);
        let seven = &cells[6];
        assert_eq!(seven.value, 7);
        assert_eq!(seven.class_list(), vec!["number", "heat-hot"]);
        assert_eq!(seven.frequency, 301);
        assert_eq!(cells[0].class_list(), vec!["number", "heat-neutral"]);
    }
}
